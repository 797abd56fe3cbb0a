//! Chat transcript model for the storefront assistant.
//!
//! The provider streams incremental chunks (text and optional source
//! citations); the transcript folds them into a single growing assistant
//! message. The provider itself stays behind the daemon so this model can be
//! exercised against fakes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reply shown when the chat stream fails mid-response.
pub const CHAT_FAILURE_REPLY: &str =
    "Sorry, I could not answer that right now. Please try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A source citation attached to an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub body: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default = "Utc::now")]
    pub sent_at: DateTime<Utc>,
}

/// One increment of a streamed assistant reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatChunk {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub citation: Option<Citation>,
}

/// An in-session conversation. Append-only; chunks accumulate into the newest
/// assistant message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn push_user(&mut self, body: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            body: body.into(),
            citations: Vec::new(),
            sent_at: Utc::now(),
        });
    }

    /// Start an empty assistant reply for chunks to accumulate into.
    pub fn begin_reply(&mut self) {
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            body: String::new(),
            citations: Vec::new(),
            sent_at: Utc::now(),
        });
    }

    /// Fold one streamed chunk into the current assistant reply. Starts a
    /// reply if the transcript does not end with one. Citations are
    /// deduplicated by URL.
    pub fn apply_chunk(&mut self, chunk: ChatChunk) {
        if !matches!(
            self.messages.last(),
            Some(ChatMessage {
                role: ChatRole::Assistant,
                ..
            })
        ) {
            self.begin_reply();
        }
        let reply = self
            .messages
            .last_mut()
            .filter(|m| m.role == ChatRole::Assistant);
        let Some(reply) = reply else { return };
        if let Some(text) = chunk.text {
            reply.body.push_str(&text);
        }
        if let Some(citation) = chunk.citation {
            if !reply.citations.iter().any(|c| c.url == citation.url) {
                reply.citations.push(citation);
            }
        }
    }

    /// Replace the current assistant reply with the generic failure message.
    /// Used when the stream errors out partway through.
    pub fn fail_reply(&mut self) {
        match self.messages.last_mut() {
            Some(reply) if reply.role == ChatRole::Assistant => {
                reply.body = CHAT_FAILURE_REPLY.to_string();
                reply.citations.clear();
            }
            _ => {
                self.begin_reply();
                if let Some(reply) = self.messages.last_mut() {
                    reply.body = CHAT_FAILURE_REPLY.to_string();
                }
            }
        }
    }
}
