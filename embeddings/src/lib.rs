//! # FAQ Embeddings
//!
//! Text embedding for the question/answer corpus. The default backend runs a
//! multilingual sentence-embedding model locally via fastembed-rs (ONNX
//! Runtime), so Turkish and English questions land in the same vector space.
//!
//! Everything downstream talks to the [`Embedder`] trait, which keeps the
//! vector index testable with deterministic fake embeddings.
//!
//! ## Example
//!
//! ```no_run
//! use faq_embeddings::{Embedder, EmbeddingService};
//!
//! fn main() -> Result<(), faq_embeddings::EmbeddingError> {
//!     let service = EmbeddingService::new()?;
//!     let embeddings = service.embed(vec!["ÇAP başvurusu nasıl yapılır?".to_string()])?;
//!     println!("Generated {} embeddings", embeddings.len());
//!     Ok(())
//! }
//! ```

mod error;
mod service;

pub use error::EmbeddingError;
pub use service::EmbeddingConfig;
pub use service::EmbeddingModelType;
pub use service::EmbeddingService;

/// Anything that turns text into dense vectors.
///
/// Implementations must return exactly one vector per input text, in input
/// order, and all vectors must share one dimension.
pub trait Embedder: Send + Sync {
    /// Generate embeddings for a batch of texts
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Generate a single embedding for a text
    fn embed_single(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut embeddings = self.embed(vec![text.to_string()])?;
        embeddings
            .pop()
            .ok_or_else(|| EmbeddingError::EmbeddingGeneration("No embedding generated".into()))
    }
}
