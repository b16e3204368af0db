use crate::config::RetrievalConfig;
use crate::context::{format_context, truncate_chars};
use crate::error::{Result, RetrievalError};
use crate::expander::QueryExpander;
use crate::keywords::KeywordAugmenter;
use crate::rerank::keyword_rerank;
use crate::result::{RetrievalStats, RetrievedContext};
use faq_vector_store::VectorIndex;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Builds a bounded context string for a question.
///
/// Pipeline: HyDE expansion -> keyword augmentation -> vector search ->
/// keyword reranking -> labeled formatting -> character cutoff.
pub struct Retriever {
    config: RetrievalConfig,
    expander: QueryExpander,
    augmenter: KeywordAugmenter,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    pub fn new(
        config: RetrievalConfig,
        expander: QueryExpander,
        augmenter: KeywordAugmenter,
        index: Arc<dyn VectorIndex>,
    ) -> Result<Self> {
        config.validate().map_err(RetrievalError::InvalidConfig)?;

        info!(
            "Initializing retriever over {} documents (k={}, max {} chars)",
            index.len(),
            config.top_k,
            config.max_context_chars
        );

        Ok(Self {
            config,
            expander,
            augmenter,
            index,
        })
    }

    /// Context string for `question` using the configured `k` and budget
    pub async fn retrieve_context(&self, question: &str) -> String {
        self.retrieve(question, self.config.top_k, self.config.max_context_chars)
            .await
    }

    /// Context string for `question`; empty when nothing was retrieved
    pub async fn retrieve(&self, question: &str, k: usize, max_context_chars: usize) -> String {
        self.retrieve_detailed(question, k, max_context_chars)
            .await
            .text
    }

    /// Run the full pipeline and report every intermediate decision
    pub async fn retrieve_detailed(
        &self,
        question: &str,
        k: usize,
        max_context_chars: usize,
    ) -> RetrievedContext {
        let start = Instant::now();
        let mut stats = RetrievalStats::default();

        debug!("Retrieving context for: '{question}'");

        // Stage 1: hypothetical answer
        let expansion_start = Instant::now();
        let expansion = self.expander.expand(question).await;
        stats.expansion_time_ms = expansion_start.elapsed().as_millis() as u64;
        if expansion.is_fallback() {
            debug!("Using fallback expansion");
        }

        // Stage 2: keyword augmentation
        let search_query = self
            .augmenter
            .augment(question, &format!("{question} {}", expansion.text()));

        // Stage 3: vector search
        let search_start = Instant::now();
        let (candidates, search_error) = match self.index.search(&search_query, k).await {
            Ok(results) => (results, None),
            Err(e) => {
                warn!("Vector search failed: {e}");
                (Vec::new(), Some(e.to_string()))
            }
        };
        stats.search_time_ms = search_start.elapsed().as_millis() as u64;
        stats.candidates = candidates.len();
        debug!("Vector search returned {} candidates", candidates.len());

        // Stage 4: keyword reranking
        let keyword_boost = self.augmenter.matches_any(question);
        let documents = keyword_rerank(question, candidates, k, &self.augmenter);
        stats.kept = documents.len();

        // Stage 5/6: format and bound
        let mut text = format_context(&documents);
        let truncated = truncate_chars(&mut text, max_context_chars);
        if truncated {
            debug!("Context truncated to {max_context_chars} characters");
        }

        stats.total_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Retrieval completed in {}ms, kept {} of {} documents",
            stats.total_time_ms, stats.kept, stats.candidates
        );

        RetrievedContext {
            text,
            documents,
            expansion,
            search_query,
            keyword_boost,
            truncated,
            search_error,
            stats,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }
}
