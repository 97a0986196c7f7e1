use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Metadata;

/// Account balance as reported by the usage API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditBalance {
    pub balance: f64,
    pub currency: String,
    pub low_balance_threshold: f64,
    pub auto_recharge_enabled: bool,
    #[serde(default)]
    pub last_recharged_at: Option<DateTime<Utc>>,
    pub usage_this_month: f64,
}

/// Detailed credit ledger for one owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserCredits {
    pub user_id: String,
    pub credits: f64,
    #[serde(default)]
    pub total_purchased: f64,
    #[serde(default)]
    pub total_used: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UserCreditsSimple {
    pub credits: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UsagePeriod {
    Day,
    Week,
    #[default]
    Month,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageStats {
    pub period: String,
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
    #[serde(default)]
    pub api_calls: Metadata,
    #[serde(default)]
    pub voice_calls: Metadata,
    #[serde(default)]
    pub rate_limits: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountLimits {
    pub plan: String,
    #[serde(default)]
    pub limits: Metadata,
    #[serde(default)]
    pub current_usage: Metadata,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct UsageParams {
    pub period: UsagePeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
}

impl UsageParams {
    #[must_use]
    pub fn new(period: UsagePeriod) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn from_date(mut self, from: DateTime<Utc>) -> Self {
        self.from_date = Some(from);
        self
    }

    #[must_use]
    pub const fn to_date(mut self, to: DateTime<Utc>) -> Self {
        self.to_date = Some(to);
        self
    }
}
