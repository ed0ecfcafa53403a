use thiserror::Error;

#[derive(Error, Debug)]
pub enum PclustError {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[allow(dead_code)]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("ML error: {0}")]
    Ml(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PclustError>;
