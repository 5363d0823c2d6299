use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use timesheet_generator::{
    OllamaSummarizer, Settings, TimesheetService, config::AppConfig, helpers::email::Mailer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Timesheet Generator");

    let config = AppConfig::from_env();
    let settings = Settings::load(&config.settings_path)?;

    let summarizer = match OllamaSummarizer::new(&config.ollama_url, &config.model, config.llm_timeout) {
        Ok(summarizer) => {
            info!("Summarizing tasks with {} at {}", summarizer.model(), config.ollama_url);
            Some(summarizer)
        }
        Err(e) => {
            warn!("Error initializing LLM, task descriptions will not be summarized: {:#}", e);
            None
        }
    };

    let mailer = config
        .mail
        .as_ref()
        .map(|mail| Mailer::new(&mail.api_key, &mail.from, &mail.manager));

    let service = TimesheetService::new(settings, config.settings_path.clone(), summarizer, mailer);

    let app = Router::new()
        .nest("/api", service.router())
        .route("/health", axum::routing::get(|| async { "OK" }));

    let listener = TcpListener::bind(&config.bind).await?;
    info!("Server running on http://{}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
