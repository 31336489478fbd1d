pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod model;
pub mod persistence;
pub mod solver;

pub use error::{BoneMarketError, Result};
pub use solver::{Solution, SolveOutcome, SolveParameters, SolveStatus, solve};
