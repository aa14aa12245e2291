use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::assistant::Assistant;

/// Shown in place of an assistant reply whenever the call fails.
pub const APOLOGY: &str = "I apologize, but I encountered an error. Please try again or contact support if the issue persists.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Chat transcript bound to one assistant.
pub struct Conversation<A> {
    assistant: A,
    messages: Vec<ChatMessage>,
}

impl<A: Assistant> Conversation<A> {
    pub fn new(assistant: A) -> Self {
        Self {
            assistant,
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sends `input` and records both sides of the exchange.
    ///
    /// Blank input is ignored and returns `None`. A failed call still yields
    /// a reply: [`APOLOGY`].
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }
        self.push(Speaker::User, input.to_string());

        let reply = match self.assistant.reply(input).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "assistant call failed");
                APOLOGY.to_string()
            }
        };
        self.push(Speaker::Assistant, reply);
        self.messages.last()
    }

    fn push(&mut self, speaker: Speaker, content: String) {
        self.messages.push(ChatMessage {
            speaker,
            content,
            timestamp: Utc::now(),
        });
    }
}
