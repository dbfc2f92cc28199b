//! Offer / discount data models.
//!
//! `DiscountKind` carries exactly one availability payload per tag, so an
//! offer cannot be "simple" and hold a schedule at the same time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::{
    DaySchedule, DiscountSchedule, ScheduleOutput, TimeOfDay, TimeSlot, ValidityPeriod, Weekday,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKindTag {
    Simple,
    Event,
    Complex,
}

impl DiscountKindTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKindTag::Simple => "simple",
            DiscountKindTag::Event => "event",
            DiscountKindTag::Complex => "complex",
        }
    }
}

/// How an offer's availability is expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Runs forever.
    #[default]
    Simple,
    /// Runs for a date range.
    #[serde(rename_all = "camelCase")]
    Event { validity_period: ValidityPeriod },
    /// Runs on specific days and times.
    Complex { schedule: DiscountSchedule },
}

impl DiscountKind {
    pub fn tag(&self) -> DiscountKindTag {
        match self {
            DiscountKind::Simple => DiscountKindTag::Simple,
            DiscountKind::Event { .. } => DiscountKindTag::Event,
            DiscountKind::Complex { .. } => DiscountKindTag::Complex,
        }
    }

    /// Pre-filled payload for a freshly selected type: events span
    /// `validity_days` from `today`, complex offers start with Monday
    /// 07:00-10:00.
    pub fn seeded(tag: DiscountKindTag, today: NaiveDate, validity_days: u32) -> Self {
        match tag {
            DiscountKindTag::Simple => DiscountKind::Simple,
            DiscountKindTag::Event => DiscountKind::Event {
                validity_period: ValidityPeriod::starting(today, validity_days),
            },
            DiscountKindTag::Complex => DiscountKind::Complex {
                schedule: DiscountSchedule::Recurring {
                    day_schedules: vec![DaySchedule {
                        day_of_week: Weekday::MONDAY,
                        enabled: true,
                        time_slots: vec![TimeSlot::new(
                            TimeOfDay::from_parts(7, 0),
                            TimeOfDay::from_parts(10, 0),
                        )],
                    }],
                    validity_period: None,
                },
            },
        }
    }

    /// What the schedule editor opens with for this offer.
    pub fn editor_input(&self) -> (Vec<DaySchedule>, Option<ValidityPeriod>) {
        match self {
            DiscountKind::Complex {
                schedule:
                    DiscountSchedule::Recurring {
                        day_schedules,
                        validity_period,
                    },
            } => (day_schedules.clone(), *validity_period),
            DiscountKind::Complex {
                schedule: DiscountSchedule::DateRange { validity_period },
            }
            | DiscountKind::Event { validity_period } => (Vec::new(), Some(*validity_period)),
            DiscountKind::Complex {
                schedule: DiscountSchedule::Always,
            }
            | DiscountKind::Simple => (Vec::new(), None),
        }
    }

    /// A saved editor result always turns the offer into a recurring one.
    pub fn from_schedule_output(output: ScheduleOutput) -> Self {
        DiscountKind::Complex {
            schedule: DiscountSchedule::Recurring {
                day_schedules: output.day_schedules,
                validity_period: output.validity_period,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: i64,
    pub name: String,
    pub percentage: f64,
    pub is_active: bool,
    pub promo_code: Option<String>,
    pub max_amount: Option<f64>,
    pub allowed_roles: Vec<String>,
    pub description: Option<String>,
    pub kind: DiscountKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating or updating an offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountInput {
    pub name: String,
    pub percentage: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub promo_code: Option<String>,
    #[serde(default)]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub allowed_roles: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: DiscountKind,
}

fn default_active() -> bool {
    true
}

impl DiscountInput {
    /// Trims text fields and turns blank optionals into `None`.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.promo_code = blank_to_none(self.promo_code);
        self.description = blank_to_none(self.description);
        self.allowed_roles = self
            .allowed_roles
            .into_iter()
            .map(|role| role.trim().to_string())
            .filter(|role| !role.is_empty())
            .collect();
        self
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validation functions for offer input
pub mod validation {
    use super::DiscountInput;
    use anyhow::{bail, Result};

    pub fn validate_discount(input: &DiscountInput) -> Result<()> {
        if input.name.trim().is_empty() {
            bail!("Offer name is required");
        }
        if !(0.0..=100.0).contains(&input.percentage) {
            bail!("Discount percentage must be between 0 and 100");
        }
        if let Some(max) = input.max_amount {
            if !max.is_finite() || max < 0.0 {
                bail!("Maximum discount amount cannot be negative");
            }
        }
        Ok(())
    }
}
