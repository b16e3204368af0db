use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Invalid retrieval configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
