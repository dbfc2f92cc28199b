//! Dropdown coordination and searchable option filtering.
//!
//! At most one dropdown is open at a time. Opening one notifies the
//! previously open dropdown through the channel it received on `register`.
//!
//! Library API for front ends embedding the crate; no desktop command or
//! app state field wraps it.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::log_debug;

const ENABLE_LOGS: bool = false;

#[derive(Default)]
struct RegistryInner {
    listeners: HashMap<String, mpsc::UnboundedSender<()>>,
    open: Option<String>,
}

/// Shared registry of dropdown instances. Clones share state.
#[derive(Clone, Default)]
pub struct DropdownRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl DropdownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Returns the receiver that gets a message whenever another dropdown
    /// takes over. Re-registering an id replaces its listener.
    pub fn register(&self, id: &str) -> mpsc::UnboundedReceiver<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().listeners.insert(id.to_string(), tx);
        rx
    }

    pub fn unregister(&self, id: &str) {
        let mut inner = self.lock();
        inner.listeners.remove(id);
        if inner.open.as_deref() == Some(id) {
            inner.open = None;
        }
    }

    /// Marks `id` open, closing whichever dropdown was open before.
    pub fn open(&self, id: &str) {
        let mut inner = self.lock();
        if let Some(previous) = inner.open.take() {
            if previous != id {
                if let Some(listener) = inner.listeners.get(&previous) {
                    // Receiver gone means the dropdown was dropped without unregistering
                    let _ = listener.send(());
                }
                log_debug!("Dropdown {previous} closed by {id}");
            }
        }
        inner.open = Some(id.to_string());
    }

    /// Clears the open marker if `id` holds it. Returns whether it did.
    pub fn close(&self, id: &str) -> bool {
        let mut inner = self.lock();
        if inner.open.as_deref() == Some(id) {
            inner.open = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<String> {
        self.lock().open.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Case-insensitive substring match on label or description, order kept.
/// The query is used as typed; surrounding whitespace is significant.
pub fn filter_options<'a>(options: &'a [SelectOption], query: &str) -> Vec<&'a SelectOption> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return options.iter().collect();
    }

    options
        .iter()
        .filter(|option| {
            option.label.to_lowercase().contains(&needle)
                || option
                    .description
                    .as_deref()
                    .is_some_and(|description| description.to_lowercase().contains(&needle))
        })
        .collect()
}
