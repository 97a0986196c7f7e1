use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{
    DEFAULT_LIMIT, DEFAULT_PAGE, Metadata, require_non_empty, validate_pagination,
};
use crate::error::{Error, Result};

const E164_MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Initiated,
    Connecting,
    Active,
    Completed,
    Failed,
    /// A status this client does not know. Only produced by decoding.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Call {
    #[serde(alias = "id")]
    pub call_id: String,
    pub status: CallStatus,
    pub agent_id: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub transcript_available: bool,
    #[serde(default)]
    pub recording_available: bool,
    #[serde(default)]
    pub context: Option<Metadata>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptEntry {
    pub timestamp: DateTime<Utc>,
    /// `agent` or `customer`.
    pub speaker: String,
    pub text: String,
    #[serde(default)]
    pub audio_duration: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    pub call_id: String,
    pub transcript: Vec<TranscriptEntry>,
    #[serde(default)]
    pub summary: Option<String>,
    pub duration: u64,
    pub word_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recording {
    pub call_id: String,
    pub recording_url: String,
    pub duration: u64,
    pub format: String,
    pub size_bytes: u64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StartCallRequest {
    pub agent_id: String,
    /// E.164, e.g. `+15551234567`.
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl StartCallRequest {
    #[must_use]
    pub fn new(agent_id: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            phone_number: phone_number.into(),
            context: None,
            webhook_url: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn context(mut self, context: Metadata) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// # Errors
    /// Returns a validation error if the agent id is empty or the phone number
    /// is not in E.164 form.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        require_non_empty("agent_id", &self.agent_id)?;
        let digits = self.phone_number.strip_prefix('+').unwrap_or_default();
        let valid = !digits.is_empty()
            && digits.len() <= E164_MAX_DIGITS
            && digits.bytes().all(|b| b.is_ascii_digit());
        if !valid {
            return Err(Error::Validation(format!(
                "phone_number must be in E.164 format, got `{}`",
                self.phone_number
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListCallsParams {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CallStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
}

impl Default for ListCallsParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            agent_id: None,
            status: None,
            from_date: None,
            to_date: None,
        }
    }
}

impl ListCallsParams {
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
    pub const fn status(mut self, status: CallStatus) -> Self {
        self.status = Some(status);
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

    /// # Errors
    /// Returns a validation error for out-of-range pagination, an inverted
    /// date range, or a [`CallStatus::Unknown`] filter.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        validate_pagination(self.page, self.limit)?;
        validate_date_range(self.from_date.as_ref(), self.to_date.as_ref())?;
        if self.status == Some(CallStatus::Unknown) {
            return Err(Error::Validation(
                "`status` filter must be a known call status".to_string(),
            ));
        }
        Ok(())
    }
}

/// # Errors
/// Returns a validation error if `from` is after `to`.
#[allow(clippy::result_large_err)]
pub(crate) fn validate_date_range(
    from: Option<&DateTime<Utc>>,
    to: Option<&DateTime<Utc>>,
) -> Result<()> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(Error::Validation(format!(
                "from_date ({from}) must not be after to_date ({to})"
            )));
        }
    }
    Ok(())
}
