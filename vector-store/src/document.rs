use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an indexed document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentSource {
    /// A question/answer pair from the FAQ corpus
    #[serde(rename = "Q&A")]
    QuestionAnswer,
}

impl DocumentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentSource::QuestionAnswer => "Q&A",
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit stored in the vector index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableDocument {
    /// Text that is embedded and later handed to the model as context
    pub content: String,

    /// Source tag
    pub source: DocumentSource,
}

impl SearchableDocument {
    /// Create a document from raw content
    pub fn new(content: impl Into<String>, source: DocumentSource) -> Self {
        Self {
            content: content.into(),
            source,
        }
    }

    /// Format a question/answer pair the way it is embedded
    pub fn from_question_answer(question: &str, answer: &str) -> Self {
        Self::new(
            format!("Question: {question}\nAnswer: {answer}"),
            DocumentSource::QuestionAnswer,
        )
    }
}
