use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use super::{EditorSnapshot, ScheduleEditor};
use crate::log_error;

const ENABLE_LOGS: bool = true;

pub const EDITOR_CHANGED_EVENT: &str = "schedule-editor-changed";

/// Receives the editor snapshot after every mutation.
pub trait EditorListener: Send + Sync {
    fn editor_changed(&self, snapshot: &EditorSnapshot) -> Result<()>;
}

/// Listener for headless use.
pub struct NoopListener;

impl EditorListener for NoopListener {
    fn editor_changed(&self, _snapshot: &EditorSnapshot) -> Result<()> {
        Ok(())
    }
}

#[cfg(feature = "desktop")]
impl EditorListener for tauri::AppHandle {
    fn editor_changed(&self, snapshot: &EditorSnapshot) -> Result<()> {
        use tauri::Emitter;

        self.emit(EDITOR_CHANGED_EVENT, snapshot.clone())
            .map_err(|err| anyhow::anyhow!("failed to emit {EDITOR_CHANGED_EVENT}: {err}"))
    }
}

/// Shared handle to the single schedule editor. Commands lock it one at a
/// time; each successful mutation is broadcast to the listener.
#[derive(Clone)]
pub struct ScheduleEditorController {
    editor: Arc<Mutex<ScheduleEditor>>,
    listener: Arc<dyn EditorListener>,
}

impl ScheduleEditorController {
    pub fn new(listener: Arc<dyn EditorListener>) -> Self {
        Self {
            editor: Arc::new(Mutex::new(ScheduleEditor::new())),
            listener,
        }
    }

    pub async fn snapshot(&self) -> EditorSnapshot {
        self.editor.lock().await.snapshot()
    }

    /// Runs `op` under the lock. The snapshot is taken and emitted only when
    /// `op` succeeds; failed operations leave nothing to announce.
    pub async fn mutate<F, T>(&self, op: F) -> Result<(T, EditorSnapshot)>
    where
        F: FnOnce(&mut ScheduleEditor) -> Result<T>,
    {
        let mut guard = self.editor.lock().await;
        let value = op(&mut *guard)?;
        let snapshot = guard.snapshot();
        drop(guard);

        if let Err(err) = self.listener.editor_changed(&snapshot) {
            log_error!("{err}");
        }
        Ok((value, snapshot))
    }

    /// Like [`mutate`](Self::mutate) but only the snapshot is wanted.
    pub async fn update<F>(&self, op: F) -> Result<EditorSnapshot>
    where
        F: FnOnce(&mut ScheduleEditor) -> Result<()>,
    {
        self.mutate(op).await.map(|(_, snapshot)| snapshot)
    }
}
