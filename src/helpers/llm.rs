use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

const TASK_SUMMARIZATION_PROMPT: &str = "Summarize the following work description into a concise task that reflects an 8-hour effort.

Format requirements:
- For brief descriptions: Expand into a 3-4 line summary (max 30 words) with inferred subtasks
- For detailed descriptions: Condense into a 1-2 line summary (max 30 words)
- Include specific tools/steps relevant to the task (e.g., for coding: VSCode, Git, Docker, Anaconda)
- Use a professional, direct tone
- Avoid introductory phrases and unnecessary details like here is the summary
- Avoid format like *bullet points* or [brackets]
- Avoid lines and points make it a paragraph or single line
- The summary is for my daily work report and should be concise and professional.

Work description: {description}";

/// Turns a raw task description into a short professional summary.
///
/// Errors are returned to the caller, which decides on the fallback.
pub trait Summarizer {
    fn summarize(&self, description: &str) -> impl Future<Output = Result<String>> + Send;
}

pub fn task_prompt(description: &str) -> String {
    TASK_SUMMARIZATION_PROMPT.replace("{description}", description)
}

/// Summarizer backed by a local Ollama server
#[derive(Clone)]
pub struct OllamaSummarizer {
    client: Client,
    generate_url: String,
    model: String,
}

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    response: String,
}

impl OllamaSummarizer {
    pub fn new(base_url: &str, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let model = model.into();
        info!("Initializing Ollama summarizer with model {} at {}", model, base_url);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for Ollama")?;

        Ok(Self {
            client,
            generate_url: format!("{}/api/generate", base_url.trim_end_matches('/')),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, description: &str) -> Result<String> {
        let prompt = task_prompt(description);
        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
        };

        debug!("Requesting summary from {}", self.generate_url);
        let response = self
            .client
            .post(&self.generate_url)
            .json(&request)
            .send()
            .await
            .context("Ollama request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            bail!("Ollama returned status {}: {}", status, error_text);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .context("Invalid JSON from Ollama")?;

        let summary = body.response.trim();
        if summary.is_empty() {
            bail!("Ollama returned an empty summary");
        }
        Ok(summary.to_string())
    }
}
