//! Per-role caps for custom (ad hoc) discounts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLimit {
    pub role_id: i64,
    pub role_name: String,
    pub max_percentage: f64,
    pub max_amount: f64,
    pub daily_limit: Option<f64>,
}

/// Without `role_id` the limit is matched by role name, then inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLimitInput {
    #[serde(default)]
    pub role_id: Option<i64>,
    pub role_name: String,
    pub max_percentage: f64,
    pub max_amount: f64,
    #[serde(default)]
    pub daily_limit: Option<f64>,
}

pub mod validation {
    use super::DiscountLimitInput;
    use anyhow::{bail, Result};

    pub fn validate_limit(input: &DiscountLimitInput) -> Result<()> {
        if input.role_name.trim().is_empty() {
            bail!("Role name is required");
        }
        if !(0.0..=100.0).contains(&input.max_percentage) {
            bail!("Max percentage must be between 0 and 100");
        }
        if !input.max_amount.is_finite() || input.max_amount < 0.0 {
            bail!("Max amount cannot be negative");
        }
        if let Some(daily) = input.daily_limit {
            if !daily.is_finite() || daily < 0.0 {
                bail!("Daily limit cannot be negative");
            }
        }
        Ok(())
    }
}
