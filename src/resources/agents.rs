use super::resource_id;
use crate::models::{
    Agent, CallStage, CreateAgentRequest, ListAgentsParams, UpdateAgentRequest,
};
use crate::{CallWhiz, Result};

const AGENTS: &str = "agents";

impl CallWhiz {
    /// Create an agent driven either by a single prompt or by stages.
    ///
    /// # Errors
    /// Returns [`crate::Error::Validation`] before any request is sent unless
    /// exactly one of `prompt` and `stages` is set.
    pub async fn create_agent(&self, request: CreateAgentRequest) -> Result<Agent> {
        request.validate()?;
        self.rest().post(&[AGENTS], &request).await
    }

    /// # Errors
    /// Returns [`crate::Error::NotFound`] if the agent does not exist.
    pub async fn get_agent(&self, agent_id: &str) -> Result<Agent> {
        let id = resource_id("agent_id", agent_id)?;
        self.rest().get(&[AGENTS, id]).await
    }

    /// # Errors
    /// Returns an error if the pagination is out of range or the request fails.
    pub async fn list_agents(&self, params: ListAgentsParams) -> Result<Vec<Agent>> {
        params.validate()?;
        self.rest().get_with_query(&[AGENTS], &params).await
    }

    /// Apply a partial update; fields left unset keep their remote values.
    ///
    /// # Errors
    /// Returns an error if the update is invalid or the request fails.
    pub async fn update_agent(&self, agent_id: &str, update: UpdateAgentRequest) -> Result<Agent> {
        let id = resource_id("agent_id", agent_id)?;
        update.validate()?;
        self.rest().put(&[AGENTS, id], &update).await
    }

    /// Delete (deactivate) an agent.
    ///
    /// # Errors
    /// Returns an error instead of `false` when deletion fails.
    pub async fn delete_agent(&self, agent_id: &str) -> Result<bool> {
        let id = resource_id("agent_id", agent_id)?;
        self.rest().delete(&[AGENTS, id]).await
    }

    /// Stages of a multi-stage agent, in conversation order.
    ///
    /// # Errors
    /// Returns an error on a v1 client or if the request fails.
    pub async fn list_agent_stages(&self, agent_id: &str) -> Result<Vec<CallStage>> {
        self.require_v2("agent stages")?;
        let id = resource_id("agent_id", agent_id)?;
        self.rest().get(&[AGENTS, id, "stages"]).await
    }
}
