use super::resource_id;
use crate::models::{UserCredits, UserCreditsSimple};
use crate::{CallWhiz, Result};

const CREDITS: &str = "credits";
const FEATURE: &str = "credits";

impl CallWhiz {
    /// Detailed credit ledger for the authenticated account.
    ///
    /// # Errors
    /// Returns an error on a v1 client or if the request fails.
    pub async fn get_credits(&self) -> Result<UserCredits> {
        self.require_v2(FEATURE)?;
        self.rest().get(&[CREDITS]).await
    }

    /// # Errors
    /// Returns an error on a v1 client or if the request fails.
    pub async fn get_credits_simple(&self) -> Result<UserCreditsSimple> {
        self.require_v2(FEATURE)?;
        self.rest().get(&[CREDITS, "simple"]).await
    }

    /// Credit ledger of another owner; needs an account allowed to see it.
    ///
    /// # Errors
    /// Returns an error on a v1 client or if the request fails.
    pub async fn get_user_credits(&self, owner_id: &str) -> Result<UserCredits> {
        self.require_v2(FEATURE)?;
        let id = resource_id("owner_id", owner_id)?;
        self.rest().get(&[CREDITS, "users", id]).await
    }
}
