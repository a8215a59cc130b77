use alliswell_api::config::{CompletionSettings, ServerConfig, redact_api_key};
use alliswell_api::router;
use alliswell_api::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    match &config.completion {
        CompletionSettings::Gemini(gemini) => tracing::info!(
            provider = "gemini",
            model = %gemini.model,
            api_key = %redact_api_key(&gemini.api_key),
            "completion backend configured"
        ),
        CompletionSettings::Bedrock { region, config } => tracing::info!(
            provider = "bedrock",
            region = %region,
            model_id = %config.model_id,
            "completion backend configured"
        ),
    }

    let state = AppState::from_settings(&config.completion).await?;
    let app = router(state);

    if std::env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
