use crate::expander::Expansion;
use faq_vector_store::ScoredDocument;

/// Everything the retriever decided for one question
#[derive(Debug, Clone)]
pub struct RetrievedContext {
    /// Bounded context string handed to the answer model
    pub text: String,

    /// Kept documents, in context order
    pub documents: Vec<ScoredDocument>,

    /// Hypothetical answer used to widen the query
    pub expansion: Expansion,

    /// Final query sent to the vector index
    pub search_query: String,

    /// Whether keyword reranking was applied
    pub keyword_boost: bool,

    /// Whether `text` was cut at the character budget
    pub truncated: bool,

    /// Vector search failure, if any; `documents` is empty in that case
    pub search_error: Option<String>,

    pub stats: RetrievalStats,
}

impl RetrievedContext {
    /// True when there is nothing to ground an answer on
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Retrieval timing and counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalStats {
    /// Hypothetical-answer generation time in milliseconds
    pub expansion_time_ms: u64,

    /// Vector search time in milliseconds
    pub search_time_ms: u64,

    /// Total retrieval time in milliseconds
    pub total_time_ms: u64,

    /// Documents returned by the vector index
    pub candidates: usize,

    /// Documents kept after reranking
    pub kept: usize,
}
