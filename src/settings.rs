use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::log_warn;

const ENABLE_LOGS: bool = true;

const MAX_VALIDITY_DAYS: u32 = 365;

/// Defaults used when seeding offers and opening the schedule editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingDefaults {
    /// Length of the validity window pre-filled for new date ranges.
    pub validity_days: u32,
}

impl Default for SchedulingDefaults {
    fn default() -> Self {
        Self { validity_days: 7 }
    }
}

impl SchedulingDefaults {
    pub fn validate(&self) -> Result<()> {
        if self.validity_days == 0 || self.validity_days > MAX_VALIDITY_DAYS {
            bail!("validity days must be between 1 and {MAX_VALIDITY_DAYS}");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserSettings {
    #[serde(default)]
    scheduling: SchedulingDefaults,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring unreadable settings at {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn scheduling(&self) -> SchedulingDefaults {
        match self.data.read() {
            Ok(guard) => guard.scheduling,
            Err(poisoned) => poisoned.into_inner().scheduling,
        }
    }

    pub fn update_scheduling(&self, defaults: SchedulingDefaults) -> Result<()> {
        defaults.validate()?;
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.scheduling = defaults;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
