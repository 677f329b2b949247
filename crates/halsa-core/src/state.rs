//! UI-agnostic conversation types
//!
//! This module contains the data structures shared between the session
//! state machine, the backend transport, and whatever front end renders
//! the conversation. Nothing here depends on a UI framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved id of the synthetic greeting that opens every conversation.
/// The greeting is the only message that is ever rewritten in place.
pub const WELCOME_ID: &str = "welcome";

/// A single entry in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Source articles backing an assistant answer, in the order the
    /// backend returned them. Empty for user messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub website_urls: Vec<String>,
}

/// The role of a chat message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}
