use super::resource_id;
use crate::models::call::validate_date_range;
use crate::models::{
    ConversationDetail, ConversationSummary, ListConversationsParams, validate_pagination,
};
use crate::{CallWhiz, Result};

const CONVERSATIONS: &str = "conversations";

impl CallWhiz {
    /// # Errors
    /// Returns an error if the filters are invalid or the request fails.
    pub async fn list_conversations(
        &self,
        params: ListConversationsParams,
    ) -> Result<Vec<ConversationSummary>> {
        validate_pagination(params.page, params.limit)?;
        validate_date_range(params.from_date.as_ref(), params.to_date.as_ref())?;
        self.rest().get_with_query(&[CONVERSATIONS], &params).await
    }

    /// # Errors
    /// Returns [`crate::Error::NotFound`] if the conversation does not exist.
    pub async fn get_conversation(&self, conversation_id: &str) -> Result<ConversationDetail> {
        let id = resource_id("conversation_id", conversation_id)?;
        self.rest().get(&[CONVERSATIONS, id]).await
    }
}
