use crate::models::call::validate_date_range;
use crate::models::{AccountLimits, CreditBalance, UsageParams, UsageStats};
use crate::{CallWhiz, Result};

const USAGE: &str = "usage";

impl CallWhiz {
    /// # Errors
    /// Returns an error if the date range is inverted or the request fails.
    pub async fn get_usage(&self, params: UsageParams) -> Result<UsageStats> {
        validate_date_range(params.from_date.as_ref(), params.to_date.as_ref())?;
        self.rest().get_with_query(&[USAGE], &params).await
    }

    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get_credit_balance(&self) -> Result<CreditBalance> {
        self.rest().get(&[USAGE, "credits"]).await
    }

    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get_account_limits(&self) -> Result<AccountLimits> {
        self.rest().get(&[USAGE, "limits"]).await
    }
}
