use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use faq_assistant::{
    AssistantConfig, Corpus, QueryRouter, Response, initialize_from_corpus,
};
use faq_embeddings::EmbeddingService;
use faq_model_client::{GeminiClient, GenerativeModel};
use log::{error, info};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Configuration file picked up from the working directory when `--config`
/// is not given
const DEFAULT_CONFIG_FILE: &str = "faq.toml";

/// Questions offered when an interactive session starts
pub const SAMPLE_QUESTIONS: &[&str] = &[
    "ÇAP başvurusu nasıl yapılır?",
    "Yandal programını tamamlamak için gerekli GNO şartı nedir?",
    "Yandal programı sertifikası almak için ne yapmalıyım?",
    "Dikey Geçiş (DGS) yolu ile kayıt yaptıran öğrenci hangi yarıyıldan öğrenime başlar?",
];

/// Ask questions about the regulations FAQ corpus
#[derive(Debug, Parser)]
#[command(name = "faq", version)]
pub struct FaqCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: FaqCommand,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Path to a TOML configuration file (defaults to ./faq.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the question/answer JSON corpus
    #[arg(long, global = true, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Number of documents retrieved per question
    #[arg(long, global = true, value_name = "K")]
    pub top_k: Option<usize>,

    /// Character budget for the retrieved context
    #[arg(long, global = true, value_name = "CHARS")]
    pub max_context_chars: Option<usize>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum FaqCommand {
    /// Answer a single question
    Ask(AskArgs),

    /// Answer questions read line by line from stdin
    Chat(ChatArgs),

    /// Validate the configuration and corpus
    Check(CheckArgs),
}

#[derive(Debug, Parser)]
pub struct AskArgs {
    /// The question to answer
    #[arg(value_name = "QUESTION")]
    pub question: String,
}

#[derive(Debug, Parser)]
pub struct ChatArgs {
    /// Do not print the sample questions on start
    #[arg(long)]
    pub no_samples: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Also embed the corpus and build the vector index
    #[arg(long)]
    pub build_index: bool,
}

impl FaqCli {
    pub async fn run(self) -> Result<()> {
        let config = load_config(&self.global)?;
        match self.command {
            FaqCommand::Ask(args) => run_ask(config, args).await,
            FaqCommand::Chat(args) => run_chat(config, args).await,
            FaqCommand::Check(args) => run_check(config, args),
        }
    }
}

/// Resolve configuration: file (explicit or `./faq.toml`), then flag overrides
pub fn load_config(args: &GlobalArgs) -> Result<AssistantConfig> {
    let mut config = match &args.config {
        Some(path) => AssistantConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            AssistantConfig::from_toml_file(Path::new(DEFAULT_CONFIG_FILE))
                .context("Failed to load faq.toml")?
        }
        None => AssistantConfig::default(),
    };

    if let Some(corpus) = &args.corpus {
        config.corpus_path = corpus.clone();
    }
    if let Some(top_k) = args.top_k {
        config.retrieval.top_k = top_k;
    }
    if let Some(max_context_chars) = args.max_context_chars {
        config.retrieval.max_context_chars = max_context_chars;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn build_model(config: &AssistantConfig) -> Result<Arc<dyn GenerativeModel>> {
    let client =
        GeminiClient::from_env(config.model.clone()).context("Failed to create model client")?;
    Ok(Arc::new(client))
}

/// Build a router; startup failures leave it unavailable instead of aborting.
///
/// The corpus is read before the embedding model is loaded, so a bad corpus
/// path is reported without touching the model.
fn start_router(config: &AssistantConfig) -> Result<QueryRouter> {
    let router = QueryRouter::new();
    let model = build_model(config)?;

    let corpus = match Corpus::load(&config.corpus_path) {
        Ok(corpus) => corpus,
        Err(e) => {
            error!("CRITICAL: question database could not be loaded: {e}");
            return Ok(router);
        }
    };
    if corpus.is_empty() {
        error!(
            "CRITICAL: corpus {} contains no usable question/answer records",
            config.corpus_path.display()
        );
        return Ok(router);
    }

    let embedder = match EmbeddingService::with_config(config.embedding.clone()) {
        Ok(embedder) => embedder,
        Err(e) => {
            error!("CRITICAL: embedding model could not be loaded: {e}");
            return Ok(router);
        }
    };

    // Failures are logged by the bootstrap and leave the router unavailable.
    if let Ok(report) = initialize_from_corpus(&router, config, corpus, Arc::new(embedder), model)
    {
        info!(
            "Loaded {} entries ({} unique questions), indexed {} documents in {}ms",
            report.entries, report.unique_questions, report.indexed_documents, report.elapsed_ms
        );
    }

    Ok(router)
}

fn print_response(response: &Response) {
    if response.is_diagnostic() {
        println!("{}", response.text().bright_red());
    } else {
        println!("{}", response.text());
    }
}

async fn run_ask(config: AssistantConfig, args: AskArgs) -> Result<()> {
    let router = start_router(&config)?;
    let response = router.respond(&args.question).await;
    print_response(&response);

    if response == Response::Unavailable {
        anyhow::bail!(
            "question database unavailable (corpus: {})",
            config.corpus_path.display()
        );
    }
    Ok(())
}

async fn run_chat(config: AssistantConfig, args: ChatArgs) -> Result<()> {
    let router = start_router(&config)?;

    if !args.no_samples {
        println!("{}", "Sample questions:".bright_blue());
        for question in SAMPLE_QUESTIONS {
            println!("  {} {question}", "•".bright_black());
        }
    }
    println!("Type a question and press Enter (Ctrl-D or 'exit' to quit).\n");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        print_response(&router.respond(question).await);
        println!();
    }

    Ok(())
}

fn run_check(config: AssistantConfig, args: CheckArgs) -> Result<()> {
    println!("{} Configuration", "▶".bright_blue());
    println!(
        "  Corpus: {}",
        config.corpus_path.display().to_string().bright_cyan()
    );
    println!(
        "  Retrieval: k={}, max {} chars",
        config.retrieval.top_k, config.retrieval.max_context_chars
    );
    println!(
        "  Generation: {} attempts, {}s apart",
        config.generation.retry_count.max(1),
        config.generation.retry_wait_secs
    );

    let model = build_model(&config)?;
    if model.is_available() {
        println!("  Model: {} {}", config.model.model.bright_cyan(), "(ready)".bright_green());
    } else {
        println!(
            "  Model: {} {}",
            config.model.model.bright_cyan(),
            format!("(no API key in {})", config.model.api_key_env).bright_yellow()
        );
    }

    let corpus = Corpus::load(&config.corpus_path).with_context(|| {
        format!("Failed to load corpus from {}", config.corpus_path.display())
    })?;
    let skipped = corpus.skipped();
    println!("\n{} Corpus", "▶".bright_blue());
    println!("  Entries: {}", corpus.len().bright_cyan());
    println!(
        "  Unique questions: {}",
        corpus.exact_matches().len().bright_cyan()
    );
    println!(
        "  Skipped records: {} (not objects: {}, missing fields: {}, blank: {})",
        skipped.total(),
        skipped.not_objects,
        skipped.missing_fields,
        skipped.blank
    );
    if corpus.is_empty() {
        anyhow::bail!("corpus contains no usable question/answer records");
    }

    if args.build_index {
        let embedder = EmbeddingService::with_config(config.embedding.clone())
            .context("Failed to load embedding model")?;
        let router = QueryRouter::new();
        let report = initialize_from_corpus(&router, &config, corpus, Arc::new(embedder), model)
            .context("Failed to build question database")?;
        println!("\n{} Vector index", "▶".bright_blue());
        println!(
            "  Indexed {} documents in {}ms",
            report.indexed_documents.bright_cyan(),
            report.elapsed_ms
        );
    }

    println!("\n{} Ready", "✓".bright_green());
    Ok(())
}
