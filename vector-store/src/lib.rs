//! # FAQ Vector Store
//!
//! Semantic similarity search over the question/answer corpus. Every entry is
//! turned into a [`SearchableDocument`], embedded once through a
//! [`faq_embeddings::Embedder`], and kept in memory for the lifetime of the
//! process. Queries are ranked by cosine similarity.
//!
//! The index is read-only after [`InMemoryVectorIndex::build`], so it can be
//! shared behind an `Arc` by any number of concurrent requests. Callers that
//! only need search should depend on the [`VectorIndex`] trait.
//!
//! ## Example
//!
//! ```no_run
//! use faq_embeddings::EmbeddingService;
//! use faq_vector_store::{InMemoryVectorIndex, SearchableDocument, VectorIndex};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let embedder = Arc::new(EmbeddingService::new()?);
//!     let docs = vec![SearchableDocument::from_question_answer(
//!         "Yandal nedir?",
//!         "Yandal, ikinci bir alanda sertifika programıdır.",
//!     )];
//!     let index = InMemoryVectorIndex::build(embedder, docs)?;
//!
//!     let results = index.search("yandal sertifikası", 5).await?;
//!     println!("Found {} similar entries", results.len());
//!     Ok(())
//! }
//! ```

mod document;
mod error;
mod index;

pub use document::{DocumentSource, SearchableDocument};
pub use error::VectorStoreError;
pub use index::{InMemoryVectorIndex, ScoredDocument, VectorIndex};
