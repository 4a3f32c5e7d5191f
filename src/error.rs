use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Disc {slot} has no main stat selected")]
    MissingMainStat { slot: u8 },

    #[error("Unknown weight profile: {0}")]
    UnknownProfile(String),
}

pub type DfResult<T> = Result<T, DiscForgeError>;
