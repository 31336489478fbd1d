//! The Bone Market model: actions, derived attributes, structural rules and
//! buyers, and the search over them.

pub mod attributes;
pub mod bindings;
pub mod buyers;
pub mod constants;
pub mod driver;
pub mod params;
pub mod solution;
pub mod structure;

pub use driver::{BuyerOutcome, SubModel, build_model, solve, solve_buyer};
pub use params::SolveParameters;
pub use solution::{SolveOutcome, SolveStatus, Solution, Step, profit_margin};
