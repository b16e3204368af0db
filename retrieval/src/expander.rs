use crate::config::ExpansionConfig;
use faq_model_client::GenerativeModel;
use log::{debug, warn};
use std::sync::Arc;

/// Outcome of hypothetical-answer expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Draft answer produced by the model
    Hypothesis(String),
    /// Deterministic stand-in used when the model could not help
    Fallback(String),
}

impl Expansion {
    pub fn text(&self) -> &str {
        match self {
            Expansion::Hypothesis(text) | Expansion::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Expansion::Fallback(_))
    }

    fn fallback(question: &str) -> Self {
        Expansion::Fallback(format!("Hypothetical answer: {question}"))
    }
}

/// Drafts a plausible answer to widen the vocabulary of the search query.
///
/// The draft only feeds the embedding; it is never shown to the user, so it
/// does not need to be correct. Exactly one model call is made per question.
pub struct QueryExpander {
    model: Arc<dyn GenerativeModel>,
    config: ExpansionConfig,
}

impl QueryExpander {
    pub fn new(model: Arc<dyn GenerativeModel>, config: ExpansionConfig) -> Self {
        Self { model, config }
    }

    pub async fn expand(&self, question: &str) -> Expansion {
        if !self.model.is_available() {
            debug!("Model unavailable, using fallback expansion");
            return Expansion::fallback(question);
        }

        let prompt = expansion_prompt(question);
        match self
            .model
            .generate(&prompt, self.config.max_output_tokens)
            .await
        {
            Ok(Some(text)) if !text.trim().is_empty() => {
                Expansion::Hypothesis(text.trim().to_string())
            }
            Ok(_) => {
                debug!("Model returned no hypothetical answer, using fallback");
                Expansion::fallback(question)
            }
            Err(e) => {
                warn!("Query expansion failed: {e}");
                Expansion::fallback(question)
            }
        }
    }
}

fn expansion_prompt(question: &str) -> String {
    format!(
        "Write a short but detailed draft answer to the question below, as if it came from \
         a regulation or FAQ document you have at hand. The answer does not have to be \
         correct; relevant keywords for a search are enough.\n\n\
         Question: {question}\n\n\
         Hypothetical answer:\n"
    )
}
