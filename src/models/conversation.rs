use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{DEFAULT_LIMIT, DEFAULT_PAGE, Metadata};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMessage {
    pub timestamp: DateTime<Utc>,
    pub speaker: String,
    pub text: String,
    #[serde(default)]
    pub audio_duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationSummary {
    pub conversation_id: String,
    pub call_id: String,
    pub agent_id: String,
    pub phone_number: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    pub duration: u64,
    pub message_count: u64,
    #[serde(default)]
    pub summary: Option<String>,
    pub outcome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationDetail {
    pub conversation_id: String,
    pub call_id: String,
    pub agent_id: String,
    pub phone_number: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    pub duration: u64,
    pub messages: Vec<ConversationMessage>,
    #[serde(default)]
    pub summary: Option<String>,
    pub outcome: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListConversationsParams {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
}

impl Default for ListConversationsParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            agent_id: None,
            from_date: None,
            to_date: None,
        }
    }
}

impl ListConversationsParams {
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    #[must_use]
    pub const fn from_date(mut self, from: DateTime<Utc>) -> Self {
        self.from_date = Some(from);
        self
    }

    #[must_use]
    pub const fn to_date(mut self, to: DateTime<Utc>) -> Self {
        self.to_date = Some(to);
        self
    }
}
