//! HTTP client for the question-answering backend.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::i18n::{Language, Translations};
use crate::state::ChatMessage;

/// Path of the question-answering endpoint, joined onto the base URL.
const QUERY_PATH: &str = "/api/v1/rag/query/";

/// How long to wait on the backend before giving up. A hung call must not
/// leave the conversation busy forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One question for the assistant, together with the conversation that led
/// up to it.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
    pub language: Language,
}

/// Outcome of a completed exchange with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// The backend produced an answer.
    Answered {
        message: String,
        website_urls: Vec<String>,
    },
    /// The backend responded but had no answer; carries the localized
    /// fallback text for the request's language.
    Degraded { message: String },
}

/// Failure classes of one exchange.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("backend returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("could not reach the backend: {0}")]
    Network(reqwest::Error),
    #[error("malformed response body: {0}")]
    Body(reqwest::Error),
    #[error("the exchange was interrupted: {0}")]
    Interrupted(tokio::task::JoinError),
}

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
    history: Vec<HistoryEntry<'a>>,
    language: &'a str,
}

/// History entries go over the wire reduced to role and content only.
#[derive(Serialize)]
struct HistoryEntry<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct QueryReply {
    answer: Option<String>,
    #[serde(default)]
    website_urls: Vec<String>,
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send one question and the prior conversation to the backend.
    pub async fn ask(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let url = format!("{}{}", self.base_url, QUERY_PATH);
        let body = QueryBody {
            query: &request.message,
            history: request
                .history
                .iter()
                .map(|msg| HistoryEntry {
                    role: msg.role.as_str(),
                    content: &msg.content,
                })
                .collect(),
            language: request.language.as_str(),
        };

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "chat request failed to reach the backend");
                ChatError::Network(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "chat request rejected by the backend");
            return Err(ChatError::Status(status));
        }

        let reply: QueryReply = response.json().await.map_err(|err| {
            warn!(error = %err, "chat response body did not parse");
            ChatError::Body(err)
        })?;

        Ok(match reply.answer.filter(|answer| !answer.is_empty()) {
            Some(answer) => ChatReply::Answered {
                message: answer,
                website_urls: reply.website_urls,
            },
            None => ChatReply::Degraded {
                message: Translations::for_language(request.language)
                    .error_no_answer
                    .to_string(),
            },
        })
    }
}
