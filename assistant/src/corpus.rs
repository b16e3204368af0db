use crate::error::{AssistantError, Result};
use faq_vector_store::SearchableDocument;
use log::{debug, info};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// One question/answer pair, both sides trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub question: String,
    pub answer: String,
}

impl CorpusEntry {
    /// The form that gets embedded and shown to the model as context
    pub fn to_document(&self) -> SearchableDocument {
        SearchableDocument::from_question_answer(&self.question, &self.answer)
    }
}

/// Verbatim question -> answer lookup.
///
/// Later duplicates replace earlier ones.
#[derive(Debug, Default, Clone)]
pub struct ExactMatchIndex {
    answers: HashMap<String, String>,
}

impl ExactMatchIndex {
    pub fn insert(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.answers.insert(question.into(), answer.into());
    }

    /// Look up a question after trimming surrounding whitespace
    pub fn get(&self, question: &str) -> Option<&str> {
        self.answers.get(question.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Records that did not make it into the corpus
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRecords {
    /// Array elements that were not JSON objects
    pub not_objects: usize,
    /// Objects missing a string `Question` or `Answer`
    pub missing_fields: usize,
    /// Question or answer empty after trimming
    pub blank: usize,
}

impl SkippedRecords {
    pub fn total(&self) -> usize {
        self.not_objects + self.missing_fields + self.blank
    }
}

/// The loaded question/answer corpus
#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
    exact: ExactMatchIndex,
    skipped: SkippedRecords,
}

impl Corpus {
    /// Read and parse a JSON corpus file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading corpus from {}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|source| AssistantError::CorpusRead {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_json_str(&raw)?;
        info!(
            "Loaded {} question/answer entries ({} unique questions, {} records skipped)",
            corpus.len(),
            corpus.exact.len(),
            corpus.skipped.total()
        );
        Ok(corpus)
    }

    /// Parse a JSON array of `{"Question": ..., "Answer": ...}` records.
    ///
    /// Malformed records are skipped; only a non-array document is an error.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Array(records) = value else {
            return Err(AssistantError::CorpusShape);
        };

        let mut entries = Vec::with_capacity(records.len());
        let mut exact = ExactMatchIndex::default();
        let mut skipped = SkippedRecords::default();

        for (position, record) in records.iter().enumerate() {
            let Some(fields) = record.as_object() else {
                debug!("Skipping corpus record {position}: not an object");
                skipped.not_objects += 1;
                continue;
            };

            let question = fields.get("Question").and_then(Value::as_str);
            let answer = fields.get("Answer").and_then(Value::as_str);
            let (Some(question), Some(answer)) = (question, answer) else {
                debug!("Skipping corpus record {position}: missing Question or Answer");
                skipped.missing_fields += 1;
                continue;
            };

            let (question, answer) = (question.trim(), answer.trim());
            if question.is_empty() || answer.is_empty() {
                debug!("Skipping corpus record {position}: blank question or answer");
                skipped.blank += 1;
                continue;
            }

            exact.insert(question, answer);
            entries.push(CorpusEntry {
                question: question.to_string(),
                answer: answer.to_string(),
            });
        }

        Ok(Self {
            entries,
            exact,
            skipped,
        })
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn exact_matches(&self) -> &ExactMatchIndex {
        &self.exact
    }

    pub fn skipped(&self) -> SkippedRecords {
        self.skipped
    }

    /// One searchable document per entry, duplicates included
    pub fn documents(&self) -> Vec<SearchableDocument> {
        self.entries.iter().map(CorpusEntry::to_document).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split into the exact-match table and the document list
    pub fn into_parts(self) -> (ExactMatchIndex, Vec<SearchableDocument>) {
        let documents = self.documents();
        (self.exact, documents)
    }
}
