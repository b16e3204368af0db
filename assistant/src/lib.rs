//! # FAQ Assistant
//!
//! Answers questions about a fixed question/answer corpus.
//!
//! A question that matches a corpus question verbatim (after trimming) gets
//! the stored answer directly. Anything else goes through
//! retrieval-augmented generation:
//!
//! ```text
//! question -> HyDE expansion -> keyword augmentation -> vector search
//!          -> keyword rerank -> bounded context -> grounded generation
//! ```
//!
//! Startup ([`initialize`]) loads the corpus, embeds it once and publishes
//! the [`QueryRouter`]'s ready state. Until that succeeds every question gets
//! a fixed diagnostic.
//!
//! ## Example
//!
//! ```no_run
//! use faq_assistant::{AssistantConfig, QueryRouter, initialize};
//! use faq_embeddings::EmbeddingService;
//! use faq_model_client::GeminiClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AssistantConfig::default();
//!     let embedder = Arc::new(EmbeddingService::with_config(config.embedding.clone())?);
//!     let model = Arc::new(GeminiClient::from_env(config.model.clone())?);
//!
//!     let router = QueryRouter::new();
//!     initialize(&router, &config, embedder, model)?;
//!
//!     println!("{}", router.answer("ÇAP başvurusu nasıl yapılır?").await);
//!     Ok(())
//! }
//! ```

mod bootstrap;
mod config;
mod corpus;
mod error;
mod generator;
mod router;
mod sleeper;

pub use bootstrap::{
    StartupReport, build_ready_state, build_ready_state_from_corpus, initialize,
    initialize_from_corpus, initialize_with_sleeper,
};
pub use config::{AssistantConfig, GenerationConfig};
pub use corpus::{Corpus, CorpusEntry, ExactMatchIndex, SkippedRecords};
pub use error::{AssistantError, Result};
pub use generator::{
    AnswerGenerator, EMPTY_CONTEXT_MESSAGE, Generation, MODEL_ERROR_PREFIX,
    MODEL_UNAVAILABLE_MESSAGE, NO_ANSWER_MESSAGE,
};
pub use router::{QueryRouter, ReadyState, Response, UNAVAILABLE_MESSAGE};
pub use sleeper::{Sleeper, TokioSleeper};
