use crate::corpus::ExactMatchIndex;
use crate::generator::{AnswerGenerator, Generation};
use faq_retrieval::Retriever;
use log::{debug, error, info};
use std::fmt;
use std::sync::{Arc, OnceLock};

pub const UNAVAILABLE_MESSAGE: &str =
    "GENERAL ERROR: the question database could not be loaded. Check the logs.";

/// What the router answered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Stored answer for a verbatim corpus question
    ExactMatch(String),
    /// Result of retrieval plus generation
    Generated(Generation),
    /// Startup did not complete
    Unavailable,
}

impl Response {
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// True for fixed error strings rather than real answers
    pub fn is_diagnostic(&self) -> bool {
        match self {
            Response::ExactMatch(_) => false,
            Response::Generated(generation) => !generation.is_answer(),
            Response::Unavailable => true,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::ExactMatch(answer) => f.write_str(answer),
            Response::Generated(generation) => write!(f, "{generation}"),
            Response::Unavailable => f.write_str(UNAVAILABLE_MESSAGE),
        }
    }
}

/// Everything a ready router needs; immutable once published.
pub struct ReadyState {
    pub exact: Arc<ExactMatchIndex>,
    pub retriever: Retriever,
    pub generator: AnswerGenerator,
}

/// Chat entry point: exact match first, then retrieval-augmented generation.
///
/// Starts out not ready. [`QueryRouter::mark_ready`] publishes the loaded
/// state exactly once; until then every question gets
/// [`Response::Unavailable`].
#[derive(Default)]
pub struct QueryRouter {
    state: OnceLock<ReadyState>,
}

impl QueryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the ready state. Returns false if the router was already ready.
    pub fn mark_ready(&self, state: ReadyState) -> bool {
        let entries = state.exact.len();
        match self.state.set(state) {
            Ok(()) => {
                info!("Router ready with {entries} exact-match questions");
                true
            }
            Err(_) => {
                error!("Router is already ready; ignoring second initialization");
                false
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state.get().is_some()
    }

    /// Answer a question with a typed outcome
    pub async fn respond(&self, question: &str) -> Response {
        let Some(state) = self.state.get() else {
            debug!("Question received before initialization completed");
            return Response::Unavailable;
        };

        if let Some(answer) = state.exact.get(question) {
            debug!("Exact match for question");
            return Response::ExactMatch(answer.to_string());
        }

        let context = state.retriever.retrieve_context(question).await;
        Response::Generated(state.generator.generate(question, &context).await)
    }

    /// Answer a question; always yields user-facing text
    pub async fn answer(&self, question: &str) -> String {
        self.respond(question).await.text()
    }
}
