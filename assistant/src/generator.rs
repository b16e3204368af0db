use crate::config::GenerationConfig;
use crate::sleeper::Sleeper;
use faq_model_client::GenerativeModel;
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const EMPTY_CONTEXT_MESSAGE: &str = "Context is empty or no relevant information was found. \
     Please check the corpus path and the model credentials.";
pub const NO_ANSWER_MESSAGE: &str = "No answer could be generated.";
pub const MODEL_UNAVAILABLE_MESSAGE: &str =
    "Error: the generative model client could not be initialized.";
pub const MODEL_ERROR_PREFIX: &str = "Generative model error: ";

/// Outcome of answer generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Grounded answer text from the model
    Answer(String),
    /// Nothing was retrieved, so the model was not asked
    EmptyContext,
    /// The model replied without any text
    NoAnswer,
    /// No usable model client
    ModelUnavailable,
    /// Every attempt failed
    Exhausted { attempts: u32, last_error: String },
}

impl Generation {
    /// User-facing text for this outcome
    pub fn text(&self) -> String {
        self.to_string()
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Generation::Answer(_))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Answer(text) => f.write_str(text),
            Generation::EmptyContext => f.write_str(EMPTY_CONTEXT_MESSAGE),
            Generation::NoAnswer => f.write_str(NO_ANSWER_MESSAGE),
            Generation::ModelUnavailable => f.write_str(MODEL_UNAVAILABLE_MESSAGE),
            Generation::Exhausted { last_error, .. } => {
                write!(f, "{MODEL_ERROR_PREFIX}{last_error}")
            }
        }
    }
}

/// Produces the final answer from retrieved context with bounded retries
pub struct AnswerGenerator {
    model: Arc<dyn GenerativeModel>,
    sleeper: Arc<dyn Sleeper>,
    config: GenerationConfig,
}

impl AnswerGenerator {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        config: GenerationConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            model,
            sleeper,
            config,
        }
    }

    /// Generate with the configured retry policy
    pub async fn generate(&self, question: &str, context: &str) -> Generation {
        self.generate_with(
            question,
            context,
            self.config.retry_count,
            self.config.retry_wait(),
        )
        .await
    }

    /// Generate with an explicit retry policy.
    ///
    /// `retry_count` is the total number of attempts; zero still makes one.
    /// The sleeper is only called between attempts, never after the last.
    pub async fn generate_with(
        &self,
        question: &str,
        context: &str,
        retry_count: u32,
        wait: Duration,
    ) -> Generation {
        if !self.model.is_available() {
            warn!("Model '{}' is unavailable, not generating", self.model.name());
            return Generation::ModelUnavailable;
        }
        if context.trim().is_empty() {
            info!("Empty context, skipping generation");
            return Generation::EmptyContext;
        }

        let prompt = answer_prompt(question, context);
        let attempts = retry_count.max(1);

        let mut attempt = 1;
        loop {
            debug!("Generation attempt {attempt}/{attempts}");
            match self
                .model
                .generate(&prompt, self.config.max_output_tokens)
                .await
            {
                Ok(Some(text)) if !text.trim().is_empty() => {
                    return Generation::Answer(text.trim().to_string());
                }
                Ok(_) => return Generation::NoAnswer,
                Err(e) => {
                    warn!("Model call failed (attempt {attempt}/{attempts}): {e}");
                    if attempt >= attempts {
                        return Generation::Exhausted {
                            attempts,
                            last_error: e.to_string(),
                        };
                    }
                }
            }
            self.sleeper.sleep(wait).await;
            attempt += 1;
        }
    }
}

fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        "Several context passages are given below.\n\
         Answer using only the given context. Do not add any other information.\n\
         Reply in a professional tone, in the same language as the question.\n\n\
         Context:\n{context}\n\n\
         Question:\n{question}\n\n\
         Answer:\n"
    )
}
