use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::helpers::llm::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_SETTINGS_FILE: &str = "timesheet_settings.json";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Mail settings, present only when both an API key and a recipient are configured
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub from: String,
    pub manager: String,
}

/// Process configuration read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub settings_path: PathBuf,
    pub ollama_url: String,
    pub model: String,
    pub llm_timeout: Duration,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    /// Load configuration from `.env` (if present) and the environment
    pub fn from_env() -> Self {
        dotenv().ok();

        let llm_timeout = env::var("OLLAMA_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS);

        let mail = match (env::var("RESEND_API_KEY"), env::var("TIMESHEET_MANAGER_EMAIL")) {
            (Ok(api_key), Ok(manager)) => Some(MailConfig {
                api_key,
                from: env::var("TIMESHEET_EMAIL_FROM")
                    .unwrap_or_else(|_| "Timesheet Generator <timesheets@localhost>".to_string()),
                manager,
            }),
            _ => {
                info!("RESEND_API_KEY or TIMESHEET_MANAGER_EMAIL not set, email delivery disabled");
                None
            }
        };

        AppConfig {
            bind: env::var("TIMESHEET_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            settings_path: env::var("TIMESHEET_SETTINGS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_FILE)),
            ollama_url: env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string()),
            model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(llm_timeout),
            mail,
        }
    }
}
