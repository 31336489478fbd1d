use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::solver::{Solution, SolveParameters};

/// Load run parameters from a JSON file.
///
/// Missing fields take their defaults; the result is not validated here.
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<SolveParameters> {
    let content = fs::read_to_string(path)?;
    let params: SolveParameters = serde_json::from_str(&content)?;
    Ok(params)
}

pub fn save_parameters<P: AsRef<Path>>(path: P, params: &SolveParameters) -> Result<()> {
    let json = serde_json::to_string_pretty(params)?;
    fs::write(path, json)?;
    Ok(())
}

/// Save a solved skeleton as pretty-printed JSON.
pub fn save_solution<P: AsRef<Path>>(path: P, solution: &Solution) -> Result<()> {
    let json = serde_json::to_string_pretty(solution)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_solution<P: AsRef<Path>>(path: P) -> Result<Solution> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the chosen actions as CSV, one row per action with its count.
pub fn write_actions_csv<P: AsRef<Path>>(path: P, solution: &Solution) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["action", "name", "count"])?;
    for step in &solution.steps {
        wtr.write_record([
            step.action.to_string(),
            step.name.clone(),
            step.count.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
