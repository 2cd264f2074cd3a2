use text_summarizer::api;
use text_summarizer::core::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    text_summarizer::setup_logging();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Configuration error: {e}"))?;

    api::serve(config).await
}
