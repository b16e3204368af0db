use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Failed to read corpus file {path}: {source}")]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corpus is not valid JSON: {0}")]
    CorpusParse(#[from] serde_json::Error),

    #[error("Corpus must be a JSON array of question/answer records")]
    CorpusShape,

    #[error("Corpus contains no usable question/answer records")]
    EmptyCorpus,

    #[error("Vector store error: {0}")]
    VectorStore(#[from] faq_vector_store::VectorStoreError),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] faq_retrieval::RetrievalError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read configuration file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, AssistantError>;
