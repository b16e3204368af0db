use crate::config::AssistantConfig;
use crate::corpus::{Corpus, SkippedRecords};
use crate::error::{AssistantError, Result};
use crate::generator::AnswerGenerator;
use crate::router::{QueryRouter, ReadyState};
use crate::sleeper::{Sleeper, TokioSleeper};
use faq_embeddings::Embedder;
use faq_model_client::GenerativeModel;
use faq_retrieval::{KeywordAugmenter, QueryExpander, Retriever};
use faq_vector_store::{InMemoryVectorIndex, VectorIndex};
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// What startup loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub entries: usize,
    pub unique_questions: usize,
    pub skipped: SkippedRecords,
    pub indexed_documents: usize,
    pub model_available: bool,
    pub elapsed_ms: u64,
}

/// Load the corpus, build the vector index and publish the router's ready
/// state.
///
/// On failure the error is logged and returned, and the router stays not
/// ready for the rest of the process.
pub fn initialize(
    router: &QueryRouter,
    config: &AssistantConfig,
    embedder: Arc<dyn Embedder>,
    model: Arc<dyn GenerativeModel>,
) -> Result<StartupReport> {
    initialize_with_sleeper(router, config, embedder, model, Arc::new(TokioSleeper))
}

pub fn initialize_with_sleeper(
    router: &QueryRouter,
    config: &AssistantConfig,
    embedder: Arc<dyn Embedder>,
    model: Arc<dyn GenerativeModel>,
    sleeper: Arc<dyn Sleeper>,
) -> Result<StartupReport> {
    let result = build_ready_state(config, embedder, model, sleeper);
    publish(router, result)
}

/// Like [`initialize`], for a corpus the caller already loaded.
///
/// Lets callers read the corpus before paying for embedding model setup.
pub fn initialize_from_corpus(
    router: &QueryRouter,
    config: &AssistantConfig,
    corpus: Corpus,
    embedder: Arc<dyn Embedder>,
    model: Arc<dyn GenerativeModel>,
) -> Result<StartupReport> {
    let result =
        build_ready_state_from_corpus(config, corpus, embedder, model, Arc::new(TokioSleeper));
    publish(router, result)
}

fn publish(
    router: &QueryRouter,
    result: Result<(ReadyState, StartupReport)>,
) -> Result<StartupReport> {
    match result {
        Ok((state, report)) => {
            if !router.mark_ready(state) {
                return Err(AssistantError::Config(
                    "router was already initialized".to_string(),
                ));
            }
            Ok(report)
        }
        Err(e) => {
            error!("CRITICAL: question database could not be built: {e}");
            Err(e)
        }
    }
}

/// Build everything a ready router needs without publishing it
pub fn build_ready_state(
    config: &AssistantConfig,
    embedder: Arc<dyn Embedder>,
    model: Arc<dyn GenerativeModel>,
    sleeper: Arc<dyn Sleeper>,
) -> Result<(ReadyState, StartupReport)> {
    let corpus = Corpus::load(&config.corpus_path)?;
    build_ready_state_from_corpus(config, corpus, embedder, model, sleeper)
}

/// Build a ready state from an already loaded corpus
pub fn build_ready_state_from_corpus(
    config: &AssistantConfig,
    corpus: Corpus,
    embedder: Arc<dyn Embedder>,
    model: Arc<dyn GenerativeModel>,
    sleeper: Arc<dyn Sleeper>,
) -> Result<(ReadyState, StartupReport)> {
    let start = Instant::now();
    config.validate()?;

    if corpus.is_empty() {
        return Err(AssistantError::EmptyCorpus);
    }
    let (entries, skipped) = (corpus.len(), corpus.skipped());

    let (exact, documents) = corpus.into_parts();
    let index = InMemoryVectorIndex::build(embedder, documents)?;
    let indexed_documents = index.len();

    let model_available = model.is_available();
    if !model_available {
        warn!(
            "Model '{}' is not available; only exact-match questions can be answered",
            model.name()
        );
    }

    let retriever = Retriever::new(
        config.retrieval.clone(),
        QueryExpander::new(model.clone(), config.expansion.clone()),
        KeywordAugmenter::default(),
        Arc::new(index),
    )?;
    let generator = AnswerGenerator::new(model, config.generation.clone(), sleeper);

    let report = StartupReport {
        entries,
        unique_questions: exact.len(),
        skipped,
        indexed_documents,
        model_available,
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Question database ready: {} entries, {} indexed in {}ms",
        report.entries, report.indexed_documents, report.elapsed_ms
    );

    let state = ReadyState {
        exact: Arc::new(exact),
        retriever,
        generator,
    };
    Ok((state, report))
}
