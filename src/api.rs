//! Trend narrative generation against a chat-completions API.
//!
//! This module talks to an OpenAI-compatible endpoint to turn the day's
//! trending titles into a short narrative analysis. It is the one component
//! with a degrade-not-fail contract: whatever goes wrong here (missing
//! credential, transport failure, bad status, malformed body), the caller
//! receives a [`TrendNarrative`] carrying the tagged reason instead of an
//! error, so a flaky AI dependency never blocks a scheduled report run.
//!
//! # Architecture
//!
//! - [`AskAsync`]: core trait defining the async prompt/response exchange
//! - [`ChatCompletionsClient`]: reqwest-backed implementation of the wire
//!   contract (`{model, messages, temperature}` in,
//!   `choices[0].message.content` out)
//! - [`SummaryGenerator`]: resolves the credential and absorbs failures
//!
//! One attempt per run; there is no retry layer.

use crate::models::{NarrativeFailure, NewsItem, TrendNarrative};
use crate::utils::{REQUEST_TIMEOUT, truncate_for_log};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Instruction text prepended to the trending titles.
const PROMPT_PREAMBLE: &str = "You are an internet trends analyst. Below are today's trending \
headlines from different platforms. Write a concise trend readout with 3 to 6 numbered points \
that capture what people care about today, then finish with one overall judgment and a \
suggestion for what to watch next. Headlines:";

/// Trait for async prompt/response interaction with a text-generation
/// service.
///
/// The seam exists so the degrade boundary in [`SummaryGenerator`] can be
/// exercised against a fake backend in tests.
pub trait AskAsync {
    /// Send a prompt and receive the generated text.
    async fn ask(&self, prompt: &str) -> Result<String, NarrativeFailure>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ChatCompletionsClient {
    pub fn new(api_url: String, api_key: String, model: String, temperature: f32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            api_key,
            model,
            temperature,
        }
    }
}

impl AskAsync for ChatCompletionsClient {
    #[instrument(level = "info", skip_all)]
    async fn ask(&self, prompt: &str) -> Result<String, NarrativeFailure> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| NarrativeFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NarrativeFailure::BadStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NarrativeFailure::Transport(e.to_string()))?;

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "Narrative response did not parse"
            );
            NarrativeFailure::MalformedResponse(e.to_string())
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| NarrativeFailure::MalformedResponse("no choices in response".into()))
    }
}

/// Build the narrative prompt: fixed instructions plus one line per item,
/// `source: title` when the source label exists, the bare title otherwise.
/// Items pass through unmodified; there is no length truncation here.
pub fn build_prompt(items: &[NewsItem]) -> String {
    let mut prompt = String::from(PROMPT_PREAMBLE);
    for item in items {
        prompt.push('\n');
        if item.source.is_empty() {
            prompt.push_str(&item.title);
        } else {
            prompt.push_str(&item.source);
            prompt.push_str(": ");
            prompt.push_str(&item.title);
        }
    }
    prompt
}

/// Ask `backend` for a narrative, absorbing any failure into the returned
/// [`TrendNarrative`]. This is the degrade boundary; nothing escapes it.
pub async fn generate_with<A: AskAsync>(backend: &A, items: &[NewsItem]) -> TrendNarrative {
    let prompt = build_prompt(items);
    match backend.ask(&prompt).await {
        Ok(text) => {
            info!(chars = text.len(), "Generated trend narrative");
            TrendNarrative::Generated(text)
        }
        Err(reason) => {
            warn!(%reason, "Narrative generation degraded to placeholder");
            TrendNarrative::Unavailable(reason)
        }
    }
}

/// Produces the trend narrative for a run, holding the credential resolved
/// at construction time so nothing here reads the process environment.
#[derive(Debug)]
pub struct SummaryGenerator {
    api_key: Option<String>,
    api_url: String,
    model: String,
    temperature: f32,
}

impl SummaryGenerator {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        model: String,
        temperature: f32,
    ) -> Self {
        Self {
            api_key,
            api_url,
            model,
            temperature,
        }
    }

    /// Generate the narrative for `items`. Never fails: a missing credential
    /// returns the fixed placeholder without any network call, and every
    /// request failure is absorbed by [`generate_with`].
    #[instrument(level = "info", skip_all, fields(items = items.len()))]
    pub async fn generate(&self, items: &[NewsItem]) -> TrendNarrative {
        let Some(api_key) = &self.api_key else {
            info!("No API key configured; skipping narrative generation");
            return TrendNarrative::Unavailable(NarrativeFailure::MissingApiKey);
        };

        let client = ChatCompletionsClient::new(
            self.api_url.clone(),
            api_key.clone(),
            self.model.clone(),
            self.temperature,
        );
        generate_with(&client, items).await
    }
}
