use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{
    DEFAULT_LIMIT, DEFAULT_PAGE, Nullable, require_non_empty, validate_pagination,
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Inactive,
    Draft,
    /// A status this client does not know. Only produced by decoding.
    #[serde(other)]
    Unknown,
}

#[allow(clippy::result_large_err)]
fn require_known_status(status: Option<AgentStatus>) -> Result<()> {
    if status == Some(AgentStatus::Unknown) {
        return Err(Error::Validation(
            "`status` must be active, inactive or draft".to_string(),
        ));
    }
    Ok(())
}

/// Provider-level voice settings (v1 agents).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceConfig {
    pub provider: String,
    pub voice_id: String,
    #[serde(default = "default_rate")]
    pub speed: f64,
    #[serde(default = "default_rate")]
    pub pitch: f64,
}

impl VoiceConfig {
    #[must_use]
    pub fn new(provider: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            voice_id: voice_id.into(),
            speed: default_rate(),
            pitch: default_rate(),
        }
    }
}

const fn default_rate() -> f64 {
    1.0
}

/// An agent's voice: a catalogue name (v2) or a provider configuration (v1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Voice {
    Name(String),
    Config(VoiceConfig),
}

impl From<&str> for Voice {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for Voice {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<VoiceConfig> for Voice {
    fn from(config: VoiceConfig) -> Self {
        Self::Config(config)
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Config(config) => write!(f, "{}/{}", config.provider, config.voice_id),
        }
    }
}

/// Language model settings (v1 agents).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl LlmConfig {
    #[must_use]
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

const fn default_temperature() -> f64 {
    0.7
}

const fn default_max_tokens() -> u32 {
    150
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentSettings {
    /// Seconds.
    pub max_call_duration: u32,
    pub enable_interruptions: bool,
    /// Seconds.
    pub silence_timeout: u32,
    /// Seconds.
    pub response_delay: f64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_call_duration: 1800,
            enable_interruptions: true,
            silence_timeout: 5,
            response_delay: 0.5,
        }
    }
}

/// One named phase of a multi-stage agent's conversation script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallStage {
    pub name: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl CallStage {
    #[must_use]
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            description: None,
            first_message: None,
            order: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn first_message(mut self, message: impl Into<String>) -> Self {
        self.first_message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: AgentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub voice: Voice,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub llm: Option<LlmConfig>,
    #[serde(default)]
    pub settings: Option<AgentSettings>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub first_message: Option<String>,
    #[serde(default)]
    pub webhook_ids: Vec<String>,
    #[serde(default)]
    pub has_stages: bool,
    #[serde(default)]
    pub stage_count: u32,
    #[serde(default)]
    pub call_count: u64,
    /// Seconds across all calls.
    #[serde(default)]
    pub total_duration: u64,
}

/// Payload for creating an agent.
///
/// An agent is driven either by a single system `prompt` or by an ordered list
/// of `stages`; exactly one must be set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateAgentRequest {
    pub name: String,
    pub voice: Voice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<CallStage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<AgentSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_ids: Option<Vec<String>>,
}

impl CreateAgentRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, voice: impl Into<Voice>) -> Self {
        Self {
            name: name.into(),
            voice: voice.into(),
            model: None,
            language: None,
            accent: None,
            prompt: None,
            stages: None,
            description: None,
            first_message: None,
            llm: None,
            settings: None,
            webhook_ids: None,
        }
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn stages(mut self, stages: impl IntoIterator<Item = CallStage>) -> Self {
        self.stages = Some(stages.into_iter().collect());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn first_message(mut self, message: impl Into<String>) -> Self {
        self.first_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn llm(mut self, llm: LlmConfig) -> Self {
        self.llm = Some(llm);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: AgentSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    #[must_use]
    pub fn webhook_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.webhook_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// # Errors
    /// Returns a validation error if the name is empty, if both or neither of
    /// `prompt` and `stages` are set, or if `stages` is empty.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        match (&self.prompt, &self.stages) {
            (Some(_), None) => Ok(()),
            (None, Some(stages)) if stages.is_empty() => Err(Error::Validation(
                "`stages` must contain at least one stage when used instead of `prompt`"
                    .to_string(),
            )),
            (None, Some(_)) => Ok(()),
            (Some(_), Some(_)) | (None, None) => Err(Error::Validation(
                "exactly one of `prompt` or `stages` must be provided".to_string(),
            )),
        }
    }
}

/// Partial update of an agent. Only fields that were set are sent.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct UpdateAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Nullable<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<Nullable<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<CallStage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_message: Option<Nullable<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<AgentSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_ids: Option<Vec<String>>,
}

impl UpdateAgentRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Nullable::Value(description.into()));
        self
    }

    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(Nullable::Null);
        self
    }

    #[must_use]
    pub fn voice(mut self, voice: impl Into<Voice>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(Nullable::Value(accent.into()));
        self
    }

    #[must_use]
    pub fn clear_accent(mut self) -> Self {
        self.accent = Some(Nullable::Null);
        self
    }

    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn stages(mut self, stages: impl IntoIterator<Item = CallStage>) -> Self {
        self.stages = Some(stages.into_iter().collect());
        self
    }

    #[must_use]
    pub fn first_message(mut self, message: impl Into<String>) -> Self {
        self.first_message = Some(Nullable::Value(message.into()));
        self
    }

    #[must_use]
    pub fn clear_first_message(mut self) -> Self {
        self.first_message = Some(Nullable::Null);
        self
    }

    #[must_use]
    pub fn llm(mut self, llm: LlmConfig) -> Self {
        self.llm = Some(llm);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: AgentSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: AgentStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn webhook_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.webhook_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// # Errors
    /// Returns a validation error if both `prompt` and `stages` are set, or if
    /// `status` is [`AgentStatus::Unknown`].
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.prompt.is_some() && self.stages.is_some() {
            return Err(Error::Validation(
                "`prompt` and `stages` cannot both be updated at once".to_string(),
            ));
        }
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        require_known_status(self.status)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListAgentsParams {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
}

impl Default for ListAgentsParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            status: None,
        }
    }
}

impl ListAgentsParams {
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
    pub const fn status(mut self, status: AgentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// # Errors
    /// Returns a validation error for out-of-range pagination or an
    /// [`AgentStatus::Unknown`] filter.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        validate_pagination(self.page, self.limit)?;
        require_known_status(self.status)
    }
}
