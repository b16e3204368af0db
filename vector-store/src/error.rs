use thiserror::Error;

/// Errors that can occur during vector index operations
#[derive(Debug, Error)]
pub enum VectorStoreError {
    /// Failed to build the index
    #[error("Failed to build vector index: {0}")]
    Build(String),

    /// Failed to search the index
    #[error("Failed to search: {0}")]
    SearchFailed(String),

    /// Embedding error
    #[error("Embedding error: {0}")]
    Embedding(#[from] faq_embeddings::EmbeddingError),
}
