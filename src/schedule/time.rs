use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wall-clock time of day at minute precision, venue-local, no timezone.
///
/// On the wire it is always the 24-hour `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            bail!("hour {hour} is out of range 0-23");
        }
        if minute > 59 {
            bail!("minute {minute} is out of range 0-59");
        }
        Ok(Self { hour, minute })
    }

    /// Unchecked constructor for compile-time constants. Callers pass
    /// in-range values.
    pub(crate) const fn from_parts(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Same minute, `hours` later; the hour wraps past 23 back to 0.
    pub fn add_hours_wrapping(&self, hours: u8) -> Self {
        Self {
            hour: ((u16::from(self.hour) + u16::from(hours)) % 24) as u8,
            minute: self.minute,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let bytes = value.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(anyhow!("invalid time '{value}', expected HH:MM"));
        }
        let hour: u8 = value[0..2]
            .parse()
            .map_err(|_| anyhow!("invalid hour in '{value}'"))?;
        let minute: u8 = value[3..5]
            .parse()
            .map_err(|_| anyhow!("invalid minute in '{value}'"))?;
        if !value[0..2].bytes().all(|b| b.is_ascii_digit())
            || !value[3..5].bytes().all(|b| b.is_ascii_digit())
        {
            return Err(anyhow!("invalid time '{value}', expected HH:MM"));
        }
        Self::new(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
