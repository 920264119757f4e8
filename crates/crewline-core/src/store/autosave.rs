//! Periodic draft autosave.
//!
//! One scheduler per wizard session: an immediate save on registration,
//! then a fixed-interval timer that re-snapshots the session and writes
//! only when the snapshot actually changed since the last write. Saves
//! run to completion on the timer task, so no two writes for the same
//! draft id are ever in flight together.

use std::time::Duration;

use log::warn;
use tokio::sync::watch;
use tokio::task::{self, JoinHandle};

use super::DraftStore;
use crate::error::{Result, WizardError};
use crate::models::DraftSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Teardown {
    Run,
    Flush,
    Drop,
}

/// Handle to a running autosave schedule.
///
/// Cancelling is idempotent and guarantees one final unconditional save
/// before the timer is torn down, so nothing entered since the last tick
/// is lost when the session ends.
pub struct AutosaveHandle {
    id: String,
    control: watch::Sender<Teardown>,
    task: Option<JoinHandle<Result<()>>>,
}

impl AutosaveHandle {
    /// The draft id this schedule writes to.
    pub fn draft_id(&self) -> &str {
        &self.id
    }

    /// Stops the timer after one final unconditional save.
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub async fn cancel(&mut self) -> Result<()> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        let _ = self.control.send(Teardown::Flush);
        match task.await {
            Ok(result) => result,
            Err(e) => Err(WizardError::Configuration {
                message: format!("Autosave task join error: {e}"),
            }),
        }
    }

    /// Stops the timer without a final save. Used when the session is
    /// being discarded and its draft deleted.
    pub async fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = self.control.send(Teardown::Drop);
            let _ = task.await;
        }
    }
}

impl DraftStore {
    /// Registers a periodic autosave for one wizard session.
    ///
    /// Takes one snapshot immediately and saves it (a failure here is
    /// logged and retried on the next tick), then re-invokes `producer`
    /// every `interval`, skipping the write when the snapshot is equal to
    /// the last one written.
    pub async fn schedule_autosave<F>(
        &self,
        producer: F,
        id: Option<String>,
        interval: Duration,
    ) -> AutosaveHandle
    where
        F: Fn() -> DraftSnapshot + Send + Sync + 'static,
    {
        let id = id.unwrap_or_else(super::mint_draft_id);
        let store = self.clone();

        let mut last_written = None;
        let snapshot = producer();
        match save_blocking(&store, &id, snapshot.clone()).await {
            Ok(()) => last_written = Some(snapshot),
            Err(e) => warn!("Autosave of draft {id} failed: {e}"),
        }

        let (control, mut signal) = watch::channel(Teardown::Run);
        let task_store = store;
        let task_id = id.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of a fresh interval fires immediately; the
            // registration save above already covered it.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let snapshot = producer();
                        if last_written.as_ref() == Some(&snapshot) {
                            continue;
                        }
                        match save_blocking(&task_store, &task_id, snapshot.clone()).await {
                            Ok(()) => last_written = Some(snapshot),
                            Err(e) => warn!("Autosave of draft {task_id} failed: {e}"),
                        }
                    }
                    changed = signal.changed() => {
                        let mode = if changed.is_ok() {
                            *signal.borrow()
                        } else {
                            // Handle dropped without a signal; stop quietly.
                            Teardown::Drop
                        };
                        match mode {
                            Teardown::Run => continue,
                            Teardown::Drop => return Ok(()),
                            Teardown::Flush => {
                                return save_blocking(&task_store, &task_id, producer()).await;
                            }
                        }
                    }
                }
            }
        });

        AutosaveHandle {
            id,
            control,
            task: Some(task),
        }
    }
}

async fn save_blocking(store: &DraftStore, id: &str, snapshot: DraftSnapshot) -> Result<()> {
    let store = store.clone();
    let id = id.to_string();
    task::spawn_blocking(move || store.save(&snapshot, Some(&id)).map(|_| ()))
        .await
        .map_err(|e| WizardError::Configuration {
            message: format!("Task join error: {e}"),
        })?
}
