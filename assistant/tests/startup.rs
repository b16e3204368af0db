use async_trait::async_trait;
use faq_assistant::{
    AssistantConfig, AssistantError, Corpus, Generation, QueryRouter, Response, Sleeper,
    initialize_from_corpus, initialize_with_sleeper,
};
use faq_embeddings::{Embedder, EmbeddingError};
use faq_model_client::GenerativeModel;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::NamedTempFile;

const CORPUS: &str = r#"[
    {"Question": "ÇAP başvurusu nasıl yapılır?", "Answer": "ÇAP başvurusu öğrenci bilgi sistemi üzerinden yapılır."},
    {"Question": "Yandal programını tamamlamak için gerekli GNO şartı nedir?", "Answer": "Yandal programından mezun olmak için GNO en az 2.00 olmalıdır."},
    {"Question": "Yandal programı sertifikası almak için ne yapmalıyım?", "Answer": "Yandal programı sertifika koşullarını sağlayan öğrenciye sertifika verilir."},
    {"Question": "Muafiyet başvurusu ne zaman yapılır?", "Answer": "Muafiyet başvurusu kayıt haftasında yapılır."},
    {"Question": "", "Answer": "Soru yok"},
    "bozuk kayıt"
]"#;

/// Counts occurrences of a handful of domain words.
struct WordEmbedder {
    calls: AtomicUsize,
}

impl Embedder for WordEmbedder {
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                ["çap", "yandal", "sertifika", "muafiyet", "gno", "başvuru"]
                    .iter()
                    .map(|w| lower.matches(w).count() as f32 + 0.1)
                    .collect()
            })
            .collect())
    }
}

struct FakeModel {
    available: bool,
    reply: Option<&'static str>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    fn new(reply: Option<&'static str>) -> Self {
        Self {
            available: true,
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn generate(
        &self,
        prompt: &str,
        _max_output_tokens: u32,
    ) -> faq_model_client::Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.reply {
            Some(reply) => Ok(Some(reply.to_string())),
            None => Err(faq_model_client::ModelError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct CountingSleeper {
    sleeps: AtomicUsize,
}

#[async_trait]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, _duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
    }
}

fn corpus_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn config_for(file: &NamedTempFile) -> AssistantConfig {
    AssistantConfig {
        corpus_path: file.path().to_path_buf(),
        ..Default::default()
    }
}

fn embedder() -> Arc<WordEmbedder> {
    Arc::new(WordEmbedder {
        calls: AtomicUsize::new(0),
    })
}

#[test_log::test(tokio::test)]
async fn test_startup_and_exact_match() {
    let file = corpus_file(CORPUS);
    let router = QueryRouter::new();
    let model = Arc::new(FakeModel::new(Some("unused")));
    let embedder = embedder();

    let report = initialize_with_sleeper(
        &router,
        &config_for(&file),
        embedder.clone(),
        model.clone(),
        Arc::new(CountingSleeper::default()),
    )
    .unwrap();

    assert_eq!(report.entries, 4);
    assert_eq!(report.indexed_documents, 4);
    assert_eq!(report.skipped.total(), 2);
    assert!(report.model_available);
    assert!(router.is_ready());
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);

    let answer = router.answer("  Muafiyet başvurusu ne zaman yapılır?  ").await;
    assert_eq!(answer, "Muafiyet başvurusu kayıt haftasında yapılır.");
    assert!(model.prompts.lock().unwrap().is_empty());
    // Exact matches never reach the index, so no query embedding either.
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
}

#[test_log::test(tokio::test)]
async fn test_rag_answer_is_grounded_in_corpus() {
    let file = corpus_file(CORPUS);
    let router = QueryRouter::new();
    let model = Arc::new(FakeModel::new(Some("Sertifika koşulları sağlanmalıdır.")));

    initialize_with_sleeper(
        &router,
        &config_for(&file),
        embedder(),
        model.clone(),
        Arc::new(CountingSleeper::default()),
    )
    .unwrap();

    let response = router.respond("Yandal sertifikası için ne gerekir?").await;
    assert_eq!(
        response,
        Response::Generated(Generation::Answer(
            "Sertifika koşulları sağlanmalıdır.".to_string()
        ))
    );

    let prompts = model.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    let generation_prompt = &prompts[1];
    assert!(generation_prompt.contains("[Document 1]\nQuestion: Yandal programı sertifikası"));
    assert!(!generation_prompt.contains("Soru yok"));
}

#[test_log::test(tokio::test)]
async fn test_failing_model_retries_then_reports() {
    let file = corpus_file(CORPUS);
    let router = QueryRouter::new();
    let model = Arc::new(FakeModel::new(None));
    let sleeper = Arc::new(CountingSleeper::default());

    initialize_with_sleeper(
        &router,
        &config_for(&file),
        embedder(),
        model.clone(),
        sleeper.clone(),
    )
    .unwrap();

    let response = router.respond("ÇAP kontenjanı kaç kişidir?").await;
    assert_eq!(
        response.text(),
        "Generative model error: API error 503: overloaded"
    );
    assert!(response.is_diagnostic());
    assert_eq!(model.prompts.lock().unwrap().len(), 4);
    assert_eq!(sleeper.sleeps.load(Ordering::SeqCst), 2);
}

#[test_log::test(tokio::test)]
async fn test_unavailable_model_still_serves_exact_matches() {
    let file = corpus_file(CORPUS);
    let router = QueryRouter::new();
    let model = Arc::new(FakeModel {
        available: false,
        ..FakeModel::new(Some("unused"))
    });

    let report = initialize_with_sleeper(
        &router,
        &config_for(&file),
        embedder(),
        model.clone(),
        Arc::new(CountingSleeper::default()),
    )
    .unwrap();
    assert!(!report.model_available);

    assert_eq!(
        router.answer("ÇAP başvurusu nasıl yapılır?").await,
        "ÇAP başvurusu öğrenci bilgi sistemi üzerinden yapılır."
    );
    assert_eq!(
        router.respond("Yatay geçiş şartları?").await,
        Response::Generated(Generation::ModelUnavailable)
    );
    assert!(model.prompts.lock().unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_missing_corpus_leaves_router_unavailable() {
    let router = QueryRouter::new();
    let config = AssistantConfig {
        corpus_path: "/nonexistent/SSS.json".into(),
        ..Default::default()
    };

    let err = initialize_with_sleeper(
        &router,
        &config,
        embedder(),
        Arc::new(FakeModel::new(Some("unused"))),
        Arc::new(CountingSleeper::default()),
    )
    .unwrap_err();

    assert!(matches!(err, AssistantError::CorpusRead { .. }));
    assert!(!router.is_ready());
    assert_eq!(router.respond("ÇAP başvurusu nasıl yapılır?").await, Response::Unavailable);
}

#[test_log::test(tokio::test)]
async fn test_corpus_without_usable_records_is_rejected() {
    let file = corpus_file(r#"[{"Question": "  ", "Answer": "x"}, 3]"#);
    let router = QueryRouter::new();

    let err = initialize_with_sleeper(
        &router,
        &config_for(&file),
        embedder(),
        Arc::new(FakeModel::new(Some("unused"))),
        Arc::new(CountingSleeper::default()),
    )
    .unwrap_err();

    assert!(matches!(err, AssistantError::EmptyCorpus));
    assert!(!router.is_ready());
}

#[test_log::test(tokio::test)]
async fn test_preloaded_corpus_is_published_without_reading_config_path() {
    let router = QueryRouter::new();
    let corpus = Corpus::from_json_str(CORPUS).unwrap();
    let embedder = embedder();
    let config = AssistantConfig {
        corpus_path: "/nonexistent/SSS.json".into(),
        ..Default::default()
    };

    let report = initialize_from_corpus(
        &router,
        &config,
        corpus,
        embedder.clone(),
        Arc::new(FakeModel::new(Some("unused"))),
    )
    .unwrap();

    assert_eq!(report.entries, 4);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        router.answer("Yandal nedir?").await,
        Response::Generated(Generation::Answer("unused".to_string())).text()
    );
}

#[test_log::test]
fn test_preloaded_empty_corpus_never_reaches_embedder() {
    let router = QueryRouter::new();
    let corpus = Corpus::from_json_str(r#"[{"Question": "", "Answer": "x"}]"#).unwrap();
    let embedder = embedder();

    let err = initialize_from_corpus(
        &router,
        &AssistantConfig::default(),
        corpus,
        embedder.clone(),
        Arc::new(FakeModel::new(Some("unused"))),
    )
    .unwrap_err();

    assert!(matches!(err, AssistantError::EmptyCorpus));
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    assert!(!router.is_ready());
}

/// Drops the last vector of every batch.
struct ShortEmbedder;

impl Embedder for ShortEmbedder {
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().skip(1).map(|_| vec![1.0, 0.0]).collect())
    }
}

#[test_log::test]
fn test_index_build_failure_surfaces_as_vector_store_error() {
    let file = corpus_file(CORPUS);
    let router = QueryRouter::new();

    let err = initialize_with_sleeper(
        &router,
        &config_for(&file),
        Arc::new(ShortEmbedder),
        Arc::new(FakeModel::new(Some("unused"))),
        Arc::new(CountingSleeper::default()),
    )
    .unwrap_err();

    assert!(matches!(err, AssistantError::VectorStore(_)), "{err:?}");
    assert!(!router.is_ready());
}
