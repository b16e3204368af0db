use crate::error::{AssistantError, Result};
use faq_embeddings::EmbeddingConfig;
use faq_model_client::ModelConfig;
use faq_retrieval::{ExpansionConfig, RetrievalConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for grounded answer generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Total model attempts per question (0 behaves like 1)
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Pause between failed attempts, in seconds
    #[serde(default = "default_retry_wait_secs")]
    pub retry_wait_secs: u64,

    /// Output cap for the final answer
    #[serde(default = "default_answer_tokens")]
    pub max_output_tokens: u32,
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_wait_secs() -> u64 {
    2
}

fn default_answer_tokens() -> u32 {
    1024
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            retry_wait_secs: default_retry_wait_secs(),
            max_output_tokens: default_answer_tokens(),
        }
    }
}

impl GenerationConfig {
    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_output_tokens == 0 {
            return Err("generation max_output_tokens must be > 0".to_string());
        }
        Ok(())
    }

    pub fn retry_wait(&self) -> Duration {
        Duration::from_secs(self.retry_wait_secs)
    }
}

/// Top-level assistant configuration, usually read from `faq.toml`.
///
/// Every section is optional in the file; missing values fall back to the
/// defaults below.
///
/// ```toml
/// corpus_path = "data/SSS.json"
///
/// [retrieval]
/// top_k = 5
/// max_context_chars = 5000
///
/// [generation]
/// retry_count = 3
/// retry_wait_secs = 2
///
/// [model]
/// model = "gemini-2.5-flash"
/// api_key_env = "GOOGLE_API_KEY"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// JSON file holding the question/answer corpus
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub expansion: ExpansionConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("data/SSS.json")
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            retrieval: RetrievalConfig::default(),
            expansion: ExpansionConfig::default(),
            generation: GenerationConfig::default(),
            model: ModelConfig::default(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl AssistantConfig {
    /// Load configuration from a TOML file and validate it
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| AssistantError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&raw).map_err(|e| match e {
            AssistantError::Config(message) => AssistantError::ConfigFile {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| AssistantError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        if self.corpus_path.as_os_str().is_empty() {
            return Err(AssistantError::Config("corpus_path must not be empty".to_string()));
        }
        self.retrieval.validate().map_err(AssistantError::Config)?;
        self.expansion.validate().map_err(AssistantError::Config)?;
        self.generation.validate().map_err(AssistantError::Config)?;
        self.model.validate().map_err(AssistantError::Config)?;
        self.embedding.validate().map_err(AssistantError::Config)?;
        Ok(())
    }
}
