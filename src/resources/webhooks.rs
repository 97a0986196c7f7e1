use super::resource_id;
use crate::models::{CreateWebhookRequest, UpdateWebhookRequest, Webhook};
use crate::{CallWhiz, Result};

const WEBHOOKS: &str = "webhooks";

impl CallWhiz {
    /// # Errors
    /// Returns a validation error for a bad URL or empty event list.
    pub async fn create_webhook(&self, request: CreateWebhookRequest) -> Result<Webhook> {
        request.validate()?;
        self.rest().post(&[WEBHOOKS], &request).await
    }

    /// # Errors
    /// Returns [`crate::Error::NotFound`] if the webhook does not exist.
    pub async fn get_webhook(&self, webhook_id: &str) -> Result<Webhook> {
        let id = resource_id("webhook_id", webhook_id)?;
        self.rest().get(&[WEBHOOKS, id]).await
    }

    /// # Errors
    /// Returns an error if the request fails.
    pub async fn list_webhooks(&self) -> Result<Vec<Webhook>> {
        self.rest().get(&[WEBHOOKS]).await
    }

    /// # Errors
    /// Returns an error if the update is invalid or the request fails.
    pub async fn update_webhook(
        &self,
        webhook_id: &str,
        update: UpdateWebhookRequest,
    ) -> Result<Webhook> {
        let id = resource_id("webhook_id", webhook_id)?;
        update.validate()?;
        self.rest().put(&[WEBHOOKS, id], &update).await
    }

    /// # Errors
    /// Returns an error instead of `false` when deletion fails.
    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<bool> {
        let id = resource_id("webhook_id", webhook_id)?;
        self.rest().delete(&[WEBHOOKS, id]).await
    }

    /// Event names a webhook can subscribe to.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn list_webhook_events(&self) -> Result<Vec<String>> {
        self.rest().get(&[WEBHOOKS, "events"]).await
    }
}
