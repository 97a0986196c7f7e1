//! Async client for the CallWhiz voice agent REST API.
//!
//! Every operation is a single HTTP round trip: the request is built from a
//! typed payload, the `{ success, data | error }` envelope is unwrapped, and the
//! payload is decoded into a typed record. Failures surface as [`Error`]; use
//! [`Error::kind`] to branch on authentication, not-found, rate-limit, service
//! or local validation failures. Nothing is retried.
//!
//! ```rust,no_run
//! use callwhiz::{CallWhiz, CreateAgentRequest, ListAgentsParams};
//!
//! # async fn run() -> callwhiz::Result<()> {
//! let mut client = CallWhiz::builder()
//!     .api_key("cw_live_...")
//!     .base_url("http://localhost:9000/v1")
//!     .build()?;
//!
//! let agent = client
//!     .create_agent(
//!         CreateAgentRequest::new("Support", "Calvin")
//!             .model("nano")
//!             .language("en")
//!             .prompt("You are a helpful customer service agent."),
//!     )
//!     .await?;
//! let agents = client.list_agents(ListAgentsParams::default()).await?;
//! assert!(agents.iter().any(|a| a.id == agent.id));
//!
//! client.close();
//! # Ok(())
//! # }
//! ```
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod models;
mod resources;
pub mod transport;

pub use config::{ApiVersion, CallWhizBuilder, ClientConfig};
pub use error::{ApiError, Error, ErrorKind, Result};
pub use models::{
    AccountLimits, Agent, AgentSettings, AgentStatus, Call, CallStage, CallStatus,
    ConversationDetail, ConversationMessage, ConversationSummary, CreateAgentRequest,
    CreateUserWebhookRequest, CreateWebhookRequest, CreditBalance, HttpMethod, ListAgentsParams,
    ListCallsParams, ListConversationsParams, ListPhoneNumbersParams, ListUserWebhooksParams,
    LlmConfig, Metadata, Nullable, ParameterDefinition, ParameterType, PhoneNumber, Recording,
    StartCallRequest, Transcript, TranscriptEntry, UpdateAgentRequest, UpdateUserWebhookRequest,
    UpdateWebhookRequest, UsageParams, UsagePeriod, UsageStats, UserCredits, UserCreditsSimple,
    UserWebhook, Voice, VoiceConfig, Webhook, WebhookRetryPolicy,
};

use transport::rest::RestAdapter;
use url::Url;

/// The main client for the CallWhiz API.
///
/// The HTTP session is opened on construction and released by [`CallWhiz::close`]
/// or when the client is dropped. After `close`, every operation fails with
/// [`Error::Closed`]; closing again is a no-op.
///
/// Thread safety: `CallWhiz` is `Send + Sync`, but concurrent use of one instance
/// is not part of its contract. Each call is independent of the others.
#[must_use]
#[derive(Debug)]
pub struct CallWhiz {
    rest: RestAdapter,
    version: ApiVersion,
}

impl CallWhiz {
    /// Connect to the default v2 API with the given key.
    ///
    /// # Errors
    /// Returns a validation error if the key is empty.
    #[allow(clippy::result_large_err)]
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn builder() -> CallWhizBuilder {
        CallWhizBuilder::new()
    }

    /// Build a client from `CALLWHIZ_*` environment variables.
    ///
    /// # Errors
    /// Returns an error if the environment is incomplete or invalid.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client cannot be built.
    #[allow(clippy::result_large_err)]
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let rest = RestAdapter::new(&config)?;
        tracing::debug!(
            "CallWhiz client ready: version={:?} base_url={}",
            config.version,
            rest.base_url()
        );
        Ok(Self {
            rest,
            version: config.version,
        })
    }

    #[must_use]
    pub const fn version(&self) -> ApiVersion {
        self.version
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        self.rest.base_url()
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.rest.is_closed()
    }

    /// Release the HTTP session. Safe to call more than once.
    pub fn close(&mut self) {
        self.rest.close();
    }

    pub(crate) const fn rest(&self) -> &RestAdapter {
        &self.rest
    }

    /// Fails locally when `what` only exists on the v2 API.
    #[allow(clippy::result_large_err)]
    pub(crate) fn require_v2(&self, what: &str) -> Result<()> {
        if self.version == ApiVersion::V2 {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "{what} require API version V2, client is configured for {:?}",
                self.version
            )))
        }
    }
}
