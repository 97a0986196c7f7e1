use super::resource_id;
use crate::models::{
    CreateUserWebhookRequest, ListUserWebhooksParams, UpdateUserWebhookRequest, UserWebhook,
    validate_pagination,
};
use crate::{CallWhiz, Result};

const USER_WEBHOOKS: &str = "user-webhooks";
const FEATURE: &str = "user webhooks";

impl CallWhiz {
    /// Register a function agents can call mid-conversation.
    ///
    /// # Errors
    /// Returns a validation error for an invalid definition, otherwise any
    /// request error.
    pub async fn create_user_webhook(
        &self,
        request: CreateUserWebhookRequest,
    ) -> Result<UserWebhook> {
        self.require_v2(FEATURE)?;
        request.validate()?;
        self.rest().post(&[USER_WEBHOOKS], &request).await
    }

    /// # Errors
    /// Returns [`crate::Error::NotFound`] if the function does not exist.
    pub async fn get_user_webhook(&self, webhook_id: &str) -> Result<UserWebhook> {
        self.require_v2(FEATURE)?;
        let id = resource_id("webhook_id", webhook_id)?;
        self.rest().get(&[USER_WEBHOOKS, id]).await
    }

    /// # Errors
    /// Returns an error if the pagination is out of range or the request fails.
    pub async fn list_user_webhooks(
        &self,
        params: ListUserWebhooksParams,
    ) -> Result<Vec<UserWebhook>> {
        self.require_v2(FEATURE)?;
        validate_pagination(params.page, params.limit)?;
        self.rest().get_with_query(&[USER_WEBHOOKS], &params).await
    }

    /// # Errors
    /// Returns an error if the update is invalid or the request fails.
    pub async fn update_user_webhook(
        &self,
        webhook_id: &str,
        update: UpdateUserWebhookRequest,
    ) -> Result<UserWebhook> {
        self.require_v2(FEATURE)?;
        let id = resource_id("webhook_id", webhook_id)?;
        update.validate()?;
        self.rest().put(&[USER_WEBHOOKS, id], &update).await
    }

    /// # Errors
    /// Returns an error instead of `false` when deletion fails.
    pub async fn delete_user_webhook(&self, webhook_id: &str) -> Result<bool> {
        self.require_v2(FEATURE)?;
        let id = resource_id("webhook_id", webhook_id)?;
        self.rest().delete(&[USER_WEBHOOKS, id]).await
    }
}
