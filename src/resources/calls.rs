use super::resource_id;
use crate::models::{Call, ListCallsParams, Recording, StartCallRequest, Transcript};
use crate::{CallWhiz, Result};

const CALLS: &str = "calls";

impl CallWhiz {
    /// Place an outbound call through an agent.
    ///
    /// # Errors
    /// Returns a validation error for a malformed phone number, otherwise any
    /// request error.
    pub async fn start_call(&self, request: StartCallRequest) -> Result<Call> {
        request.validate()?;
        self.rest().post(&[CALLS], &request).await
    }

    /// # Errors
    /// Returns [`crate::Error::NotFound`] if the call does not exist.
    pub async fn get_call(&self, call_id: &str) -> Result<Call> {
        let id = resource_id("call_id", call_id)?;
        self.rest().get(&[CALLS, id]).await
    }

    /// # Errors
    /// Returns an error if the filters are invalid or the request fails.
    pub async fn list_calls(&self, params: ListCallsParams) -> Result<Vec<Call>> {
        params.validate()?;
        self.rest().get_with_query(&[CALLS], &params).await
    }

    /// # Errors
    /// Returns [`crate::Error::NotFound`] if no transcript exists yet.
    pub async fn get_call_transcript(&self, call_id: &str) -> Result<Transcript> {
        let id = resource_id("call_id", call_id)?;
        self.rest().get(&[CALLS, id, "transcript"]).await
    }

    /// # Errors
    /// Returns [`crate::Error::NotFound`] if no recording exists yet.
    pub async fn get_call_recording(&self, call_id: &str) -> Result<Recording> {
        let id = resource_id("call_id", call_id)?;
        self.rest().get(&[CALLS, id, "recording"]).await
    }
}
