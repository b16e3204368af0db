use crate::Embedder;
use crate::error::EmbeddingError;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the embedding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model to use for embeddings
    #[serde(default = "default_model")]
    pub model: EmbeddingModelType,

    /// Maximum batch size for embedding generation
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Show download progress when downloading models
    #[serde(default)]
    pub show_download_progress: bool,

    /// Where downloaded model files are cached (fastembed default when unset)
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

fn default_model() -> EmbeddingModelType {
    EmbeddingModelType::MultilingualE5Small
}

fn default_batch_size() -> usize {
    32
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            batch_size: default_batch_size(),
            show_download_progress: false,
            cache_dir: None,
        }
    }
}

impl EmbeddingConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("embedding batch_size must be > 0".to_string());
        }
        Ok(())
    }
}

/// Supported embedding models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingModelType {
    /// multilingual-e5-small (recommended for Turkish FAQ text)
    MultilingualE5Small,
    /// paraphrase-multilingual-mpnet-base-v2 (larger, slower)
    ParaphraseMultilingualMpnet,
    /// All-MiniLM-L6-v2 (English only, lightweight)
    AllMiniLmL6V2,
}

impl EmbeddingModelType {
    fn to_fastembed_model(self) -> EmbeddingModel {
        match self {
            EmbeddingModelType::MultilingualE5Small => EmbeddingModel::MultilingualE5Small,
            EmbeddingModelType::ParaphraseMultilingualMpnet => {
                EmbeddingModel::ParaphraseMLMpnetBaseV2
            }
            EmbeddingModelType::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
        }
    }

    /// Output dimension of the model
    pub fn dimension(self) -> usize {
        match self {
            EmbeddingModelType::MultilingualE5Small => 384,
            EmbeddingModelType::ParaphraseMultilingualMpnet => 768,
            EmbeddingModelType::AllMiniLmL6V2 => 384,
        }
    }
}

/// Local embedding service backed by fastembed
pub struct EmbeddingService {
    model: TextEmbedding,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Create a new embedding service with default configuration
    pub fn new() -> Result<Self, EmbeddingError> {
        Self::with_config(EmbeddingConfig::default())
    }

    /// Create a new embedding service with custom configuration
    pub fn with_config(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        config.validate().map_err(EmbeddingError::InvalidInput)?;

        info!("Initializing embedding service with model {:?}", config.model);

        let mut init_options = InitOptions::new(config.model.to_fastembed_model())
            .with_show_download_progress(config.show_download_progress);
        if let Some(cache_dir) = &config.cache_dir {
            init_options = init_options.with_cache_dir(cache_dir.clone());
        }

        let model = TextEmbedding::try_new(init_options).map_err(|e| {
            EmbeddingError::ModelInitialization(format!("Failed to initialize model: {e}"))
        })?;

        info!("Embedding service initialized successfully");

        Ok(Self { model, config })
    }

    /// Get the dimension of embeddings produced by this service
    pub fn dimension(&self) -> usize {
        self.config.model.dimension()
    }

    /// Get the configuration of this service
    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

impl Embedder for EmbeddingService {
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in text_refs.chunks(self.config.batch_size) {
            let batch_embeddings = self.model.embed(chunk.to_vec(), None)?;
            all_embeddings.extend(batch_embeddings);
        }

        if all_embeddings.len() != texts.len() {
            return Err(EmbeddingError::EmbeddingGeneration(format!(
                "expected {} embeddings, model returned {}",
                texts.len(),
                all_embeddings.len()
            )));
        }

        debug!("Generated {} embeddings", all_embeddings.len());

        Ok(all_embeddings)
    }
}
