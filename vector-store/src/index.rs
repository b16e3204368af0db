use crate::document::SearchableDocument;
use crate::error::VectorStoreError;
use async_trait::async_trait;
use faq_embeddings::Embedder;
use log::{debug, info};
use std::sync::Arc;

/// A search result from the vector index
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    /// The document that was found
    pub document: SearchableDocument,

    /// Cosine similarity (-1.0 to 1.0, higher is better)
    pub score: f32,
}

/// k-nearest-neighbor search over an immutable document set.
///
/// Results are ordered by descending similarity. Implementations are shared
/// read-only across concurrent requests.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `k` documents closest to `query`
    async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredDocument>, VectorStoreError>;

    /// Number of indexed documents
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct StoredDocument {
    document: SearchableDocument,
    vector: Vec<f32>,
}

/// Brute-force cosine index kept in memory for the lifetime of the process
pub struct InMemoryVectorIndex {
    embedder: Arc<dyn Embedder>,
    documents: Vec<StoredDocument>,
    dimension: usize,
}

impl std::fmt::Debug for InMemoryVectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryVectorIndex")
            .field("documents", &self.documents.len())
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl InMemoryVectorIndex {
    /// Embed every document once and build the index.
    ///
    /// Fails on an empty document list; an index with nothing in it can never
    /// ground an answer.
    pub fn build(
        embedder: Arc<dyn Embedder>,
        documents: Vec<SearchableDocument>,
    ) -> Result<Self, VectorStoreError> {
        if documents.is_empty() {
            return Err(VectorStoreError::Build(
                "no documents to index".to_string(),
            ));
        }

        info!("Building vector index from {} documents", documents.len());

        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let vectors = embedder.embed(texts)?;

        if vectors.len() != documents.len() {
            return Err(VectorStoreError::Build(format!(
                "embedder returned {} vectors for {} documents",
                vectors.len(),
                documents.len()
            )));
        }

        let dimension = vectors.first().map(Vec::len).unwrap_or_default();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(VectorStoreError::Build(format!(
                "inconsistent embedding dimension: expected {dimension}, got {}",
                bad.len()
            )));
        }

        let documents = documents
            .into_iter()
            .zip(vectors)
            .map(|(document, vector)| StoredDocument { document, vector })
            .collect();

        info!("Vector index built successfully (dimension {dimension})");
        Ok(Self {
            embedder,
            documents,
            dimension,
        })
    }

    /// Embedding dimension of the indexed vectors
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredDocument>, VectorStoreError> {
        debug!("Searching for: '{query}' (k: {k})");

        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed_single(query)?;
        if query_embedding.len() != self.dimension {
            return Err(VectorStoreError::SearchFailed(format!(
                "query embedding has dimension {}, index has {}",
                query_embedding.len(),
                self.dimension
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .documents
            .iter()
            .enumerate()
            .map(|(idx, stored)| (idx, cosine_similarity(&query_embedding, &stored.vector)))
            .collect();

        // Stable sort: ties keep corpus order, so identical queries rank identically.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let results: Vec<ScoredDocument> = scored
            .into_iter()
            .take(k)
            .map(|(idx, score)| ScoredDocument {
                document: self.documents[idx].document.clone(),
                score,
            })
            .collect();

        debug!("Found {} results", results.len());
        Ok(results)
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}
