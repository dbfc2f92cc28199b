use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Absolute calendar range bounding when a schedule applies at all.
///
/// Independent of the weekly pattern; nothing here checks the two against
/// each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ValidityPeriod {
    /// From `from` through `from + days`, both ends inclusive.
    pub fn starting(from: NaiveDate, days: u32) -> Self {
        Self {
            from,
            to: from + Duration::days(i64::from(days)),
        }
    }
}

/// Range picker state. Either bound may be missing while the user is still
/// choosing; only a pair with both bounds counts as committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelection {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl RangeSelection {
    pub fn from_period(period: ValidityPeriod) -> Self {
        Self {
            from: Some(period.from),
            to: Some(period.to),
        }
    }

    /// Replaces the held range wholesale.
    pub fn set_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.from = from;
        self.to = to;
    }

    /// The committed period, bounds swapped if they were picked in reverse.
    pub fn committed(&self) -> Option<ValidityPeriod> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if to < from => Some(ValidityPeriod { from: to, to: from }),
            (Some(from), Some(to)) => Some(ValidityPeriod { from, to }),
            _ => None,
        }
    }
}
