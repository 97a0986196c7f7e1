pub mod agent;
pub mod billing;
pub mod call;
pub mod common;
pub mod conversation;
pub mod phone;
pub mod webhook;

pub use agent::{
    Agent, AgentSettings, AgentStatus, CallStage, CreateAgentRequest, ListAgentsParams, LlmConfig,
    UpdateAgentRequest, Voice, VoiceConfig,
};
pub use billing::{
    AccountLimits, CreditBalance, UsageParams, UsagePeriod, UsageStats, UserCredits,
    UserCreditsSimple,
};
pub use call::{
    Call, CallStatus, ListCallsParams, Recording, StartCallRequest, Transcript, TranscriptEntry,
};
pub use common::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, Metadata, Nullable, validate_pagination};
pub use conversation::{
    ConversationDetail, ConversationMessage, ConversationSummary, ListConversationsParams,
};
pub use phone::{ListPhoneNumbersParams, PhoneNumber};
pub use webhook::{
    CreateUserWebhookRequest, CreateWebhookRequest, HttpMethod, ListUserWebhooksParams,
    ParameterDefinition, ParameterType, UpdateUserWebhookRequest, UpdateWebhookRequest,
    UserWebhook, Webhook, WebhookRetryPolicy,
};
