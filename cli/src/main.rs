use clap::Parser;
use faq_cli::FaqCli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = FaqCli::parse();

    // A missing .env file is fine; the environment may already be set.
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => eprintln!("warning: could not read .env file: {e}"),
        _ => {}
    }

    let default_filter = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    cli.run().await
}
