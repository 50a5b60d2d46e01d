//! Generation Client
//!
//! Thin wrapper around the remote text generation endpoint. Every call
//! resolves to a [`GenerationOutcome`]: transport failures, non-200 statuses
//! and unexpected response bodies become `Degraded` with a readable reason
//! instead of an error, so itinerary generation always completes.
//!
//! ## Setup
//! - `AI_API_URL`: endpoint receiving `{"prompt", "temperature"}` (defaults to
//!   the hosted itinerary model)
//! - `AI_MODEL`: optional model identifier forwarded with each request
//! - `AI_TIMEOUT_SECS`: per-call timeout, 60 seconds when unset

use crate::models::generation::GenerationOutcome;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::{env, time::Duration};

pub const DEFAULT_AI_API_URL: &str = "https://itinerary-ai.ruzgargucu.com/v1/generate";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const RESULT_FIELD: &str = "result";

/// Anything that can turn a prompt into text.
pub trait TextGenerator {
    async fn generate(&self, prompt: &str, temperature: f32) -> GenerationOutcome;
}

#[derive(Debug, Clone)]
pub struct GenerationClientConfig {
    pub api_url: String,
    pub model: Option<String>,
    pub timeout: Duration,
}

impl Default for GenerationClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_AI_API_URL.to_string(),
            model: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GenerationClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = env::var("AI_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.api_url);
        let model = env::var("AI_MODEL").ok().filter(|m| !m.trim().is_empty());
        let timeout = env::var("AI_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            api_url,
            model,
            timeout,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Clone)]
pub struct GenerationClient {
    http_client: Client,
    config: GenerationClientConfig,
}

impl GenerationClient {
    pub fn new(config: GenerationClientConfig) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

impl TextGenerator for GenerationClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> GenerationOutcome {
        let request = GenerationRequest {
            prompt,
            temperature: temperature.clamp(0.0, 1.0),
            model: self.config.model.as_deref(),
        };

        debug!(
            "Calling AI API at {} ({} prompt chars, temperature {})",
            self.config.api_url,
            prompt.len(),
            request.temperature
        );

        let response = match self
            .http_client
            .post(&self.config.api_url)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("AI API request failed: {}", e);
                return GenerationOutcome::Degraded(format!("Error: {}", e));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!("AI API responded with status {}", status);
            return GenerationOutcome::Degraded(format!(
                "Error calling AI API: {}",
                status.as_u16()
            ));
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => match body.get(RESULT_FIELD).and_then(|v| v.as_str()) {
                Some(text) => GenerationOutcome::Generated(text.to_string()),
                None => {
                    warn!("AI API response has no \"{}\" text field", RESULT_FIELD);
                    GenerationOutcome::Degraded("Error: unexpected response from AI API".to_string())
                }
            },
            Err(e) => {
                warn!("Failed to read AI API response: {}", e);
                GenerationOutcome::Degraded(format!("Error: {}", e))
            }
        }
    }
}
