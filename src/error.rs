use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoneMarketError {
    #[error("There is no satisfactory skeleton.")]
    NoSatisfactorySkeleton,

    #[error("Unknown status returned: {0}.")]
    UnexpectedStatus(String),

    #[error("Unknown action: {name}{}", did_you_mean(.suggestion))]
    UnknownAction {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean {}?)", name),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, BoneMarketError>;
