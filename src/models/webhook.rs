use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::common::{DEFAULT_LIMIT, DEFAULT_PAGE, Nullable, require_non_empty};
use crate::error::{Error, Result};

pub const EVENT_CALL_STARTED: &str = "call.started";
pub const EVENT_CALL_COMPLETED: &str = "call.completed";
pub const EVENT_CALL_FAILED: &str = "call.failed";
pub const EVENT_TRANSCRIPT_READY: &str = "call.transcript_ready";
pub const EVENT_RECORDING_READY: &str = "call.recording_ready";
pub const EVENT_AGENT_CREATED: &str = "agent.created";
pub const EVENT_AGENT_UPDATED: &str = "agent.updated";
pub const EVENT_AGENT_DELETED: &str = "agent.deleted";

const MAX_FUNCTION_NAME_LEN: usize = 64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookRetryPolicy {
    /// 0..=10.
    pub max_retries: u32,
    /// Seconds between attempts, 1..=3600.
    pub retry_delay: u32,
}

impl Default for WebhookRetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: 60,
        }
    }
}

/// A system-level callback URL notified of platform events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Webhook {
    #[serde(alias = "id")]
    pub webhook_id: String,
    pub url: String,
    pub events: Vec<String>,
    #[serde(default)]
    pub agent_ids: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    /// Signing secret; only returned on creation.
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub retry_policy: Option<WebhookRetryPolicy>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
}

const fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateWebhookRequest {
    pub url: String,
    pub events: Vec<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<WebhookRetryPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl CreateWebhookRequest {
    #[must_use]
    pub fn new(url: impl Into<String>, events: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            url: url.into(),
            events: events.into_iter().map(Into::into).collect(),
            active: true,
            agent_ids: None,
            retry_policy: None,
            headers: None,
        }
    }

    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn agent_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.agent_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn retry_policy(mut self, policy: WebhookRetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns a validation error for a non-HTTP(S) URL or an empty event list.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        validate_callback_url(&self.url)?;
        if self.events.is_empty() {
            return Err(Error::Validation("`events` must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Partial update of a webhook. Only fields that were set are sent.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct UpdateWebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<WebhookRetryPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl UpdateWebhookRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn events(mut self, events: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.events = Some(events.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn agent_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.agent_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    #[must_use]
    pub const fn retry_policy(mut self, policy: WebhookRetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns a validation error for a non-HTTP(S) URL.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            validate_callback_url(url)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

/// One argument the agent passes when invoking a user webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl ParameterDefinition {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: false,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A caller-defined HTTP function an agent may invoke during a call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserWebhook {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub timeout_seconds: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateUserWebhookRequest {
    pub name: String,
    pub description: String,
    pub url: String,
    pub method: HttpMethod,
    pub parameters: Vec<ParameterDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,
}

impl CreateUserWebhookRequest {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            method: HttpMethod::default(),
            parameters: Vec::new(),
            headers: None,
            agent_id: None,
            timeout_seconds: None,
        }
    }

    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    #[must_use]
    pub fn agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    #[must_use]
    pub const fn timeout_seconds(mut self, secs: u32) -> Self {
        self.timeout_seconds = Some(secs);
        self
    }

    /// # Errors
    /// Returns a validation error for an invalid function name, an empty
    /// description, a non-HTTP(S) URL, or duplicate parameter names.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        validate_function_name(&self.name)?;
        require_non_empty("description", &self.description)?;
        validate_callback_url(&self.url)?;
        validate_parameters(&self.parameters)
    }
}

/// Partial update of a user webhook. Only fields that were set are sent.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct UpdateUserWebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<Nullable<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateUserWebhookRequest {
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
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn parameters(mut self, parameters: Vec<ParameterDefinition>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    #[must_use]
    pub fn agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(Nullable::Value(agent_id.into()));
        self
    }

    /// Detach the function from its agent.
    #[must_use]
    pub fn clear_agent_id(mut self) -> Self {
        self.agent_id = Some(Nullable::Null);
        self
    }

    #[must_use]
    pub const fn timeout_seconds(mut self, secs: u32) -> Self {
        self.timeout_seconds = Some(secs);
        self
    }

    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// # Errors
    /// Same checks as creation, applied to the fields that are set.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_function_name(name)?;
        }
        if let Some(url) = &self.url {
            validate_callback_url(url)?;
        }
        if let Some(parameters) = &self.parameters {
            validate_parameters(parameters)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListUserWebhooksParams {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl Default for ListUserWebhooksParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            agent_id: None,
        }
    }
}

impl ListUserWebhooksParams {
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
}

#[allow(clippy::result_large_err)]
fn validate_callback_url(raw: &str) -> Result<()> {
    let url = url::Url::parse(raw)
        .map_err(|e| Error::Validation(format!("invalid webhook url `{raw}`: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Validation(format!(
            "webhook url must use http or https, got `{other}`"
        ))),
    }
}

#[allow(clippy::result_large_err)]
fn validate_function_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_FUNCTION_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if !valid {
        return Err(Error::Validation(format!(
            "function name must be 1-{MAX_FUNCTION_NAME_LEN} characters of [A-Za-z0-9_-], got `{name}`"
        )));
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
fn validate_parameters(parameters: &[ParameterDefinition]) -> Result<()> {
    let mut seen = HashSet::new();
    for parameter in parameters {
        require_non_empty("parameter name", &parameter.name)?;
        if !seen.insert(parameter.name.as_str()) {
            return Err(Error::Validation(format!(
                "duplicate parameter `{}`",
                parameter.name
            )));
        }
    }
    Ok(())
}
