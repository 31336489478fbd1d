mod files;

pub use files::{load_parameters, load_solution, save_parameters, save_solution, write_actions_csv};
