//! Debounced autosave.
//!
//! Edits are pushed as whole snapshots. Once no edit has arrived for the quiet
//! period, the latest snapshot is compared against the last snapshot the sink
//! acknowledged and saved only when they differ. A failed save leaves the
//! acknowledged snapshot unchanged, so the next edit retries. Writes made
//! outside the autosaver rebase it onto the newly stored content. A saver with
//! nothing to do stops after the idle timeout.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::ResumeContent;
use crate::resumes::store;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// A saver with nothing pending stops after this long without commands.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Pending commands buffered per saver before `push` waits.
const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosavePolicy {
    pub quiet: Duration,
    pub idle: Duration,
}

impl Default for AutosavePolicy {
    fn default() -> Self {
        AutosavePolicy {
            quiet: DEFAULT_QUIET_PERIOD,
            idle: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sink
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait SaveSink: Send + Sync + 'static {
    async fn save(&self, content: &ResumeContent) -> Result<(), AppError>;
}

/// Writes drafts to the `resumes` row they belong to.
pub struct ResumeStoreSink {
    db: PgPool,
    resume_id: Uuid,
}

impl ResumeStoreSink {
    pub fn new(db: PgPool, resume_id: Uuid) -> Self {
        Self { db, resume_id }
    }
}

#[async_trait]
impl SaveSink for ResumeStoreSink {
    async fn save(&self, content: &ResumeContent) -> Result<(), AppError> {
        let value = serde_json::to_value(content)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("draft serialization failed: {e}")))?;
        store::update_resume(&self.db, self.resume_id, None, Some(&value), None)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Resume {} not found", self.resume_id)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Autosaver
// ────────────────────────────────────────────────────────────────────────────

enum Command {
    /// A snapshot from the editor, saved once edits go quiet.
    Edit(ResumeContent),
    /// The stored content changed elsewhere. Replaces the acknowledged
    /// snapshot and drops the pending edit, which is older than the write.
    Rebase(ResumeContent),
}

pub struct Autosaver<S: SaveSink> {
    commands: mpsc::Sender<Command>,
    task: JoinHandle<()>,
    _sink: PhantomData<fn(S)>,
}

impl<S: SaveSink> Autosaver<S> {
    /// Spawns the debounce task. `saved` is the snapshot already persisted,
    /// if any; pushing an identical snapshot then produces no save.
    pub fn spawn(sink: S, policy: AutosavePolicy, saved: Option<ResumeContent>) -> Self {
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(run(sink, rx, policy, saved));
        Self {
            commands,
            task,
            _sink: PhantomData,
        }
    }

    /// Queues a snapshot. When the task has stopped the snapshot is handed back.
    pub async fn push(&self, content: ResumeContent) -> Result<(), ResumeContent> {
        self.commands
            .send(Command::Edit(content))
            .await
            .map_err(|mpsc::error::SendError(command)| match command {
                Command::Edit(content) | Command::Rebase(content) => content,
            })
    }

    /// Records `content` as what is now stored. Returns false if the task has
    /// stopped, in which case there is nothing to correct.
    pub async fn rebase(&self, content: ResumeContent) -> bool {
        self.commands.send(Command::Rebase(content)).await.is_ok()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Saves any pending edit without waiting for the quiet period, then stops.
    pub async fn flush(self) {
        drop(self.commands);
        if let Err(e) = self.task.await {
            warn!("autosave task ended abnormally: {e}");
        }
    }
}

async fn run<S: SaveSink>(
    sink: S,
    mut rx: mpsc::Receiver<Command>,
    policy: AutosavePolicy,
    mut acknowledged: Option<ResumeContent>,
) {
    let mut pending: Option<ResumeContent> = None;
    loop {
        // A pending edit waits for the quiet period; otherwise wait for the idle limit.
        let wait = if pending.is_some() { policy.quiet } else { policy.idle };
        let command = match tokio::time::timeout(wait, rx.recv()).await {
            Ok(command) => command,
            Err(_) => {
                match pending.take() {
                    Some(snapshot) => save(&sink, snapshot, &mut acknowledged).await,
                    None => {
                        // Refuse new commands but still drain what is buffered.
                        debug!("Autosave idle, stopping");
                        rx.close();
                    }
                }
                continue;
            }
        };

        match command {
            // Newer edits supersede the pending one and restart the quiet period.
            Some(Command::Edit(snapshot)) => pending = Some(snapshot),
            Some(Command::Rebase(snapshot)) => {
                pending = None;
                acknowledged = Some(snapshot);
            }
            None => {
                if let Some(snapshot) = pending.take() {
                    save(&sink, snapshot, &mut acknowledged).await;
                }
                break;
            }
        }
    }
}

async fn save<S: SaveSink>(
    sink: &S,
    snapshot: ResumeContent,
    acknowledged: &mut Option<ResumeContent>,
) {
    if acknowledged.as_ref() == Some(&snapshot) {
        debug!("Autosave skipped: snapshot unchanged");
        return;
    }
    match sink.save(&snapshot).await {
        Ok(()) => {
            debug!("Autosave stored snapshot");
            *acknowledged = Some(snapshot);
        }
        Err(e) => warn!("Autosave failed, will retry on next edit: {e}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-resume registry
// ────────────────────────────────────────────────────────────────────────────

type DraftSaver = Arc<Autosaver<ResumeStoreSink>>;

/// One autosaver per resume being edited, created on the first draft and
/// replaced once it has stopped for idleness.
#[derive(Clone, Default)]
pub struct DraftSavers {
    savers: Arc<Mutex<HashMap<Uuid, DraftSaver>>>,
}

impl DraftSavers {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, DraftSaver>>, AppError> {
        self.savers
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("draft saver registry poisoned")))
    }

    /// Queues a draft for `resume_id`. A new saver is seeded with `saved`, the
    /// content currently stored.
    pub async fn push_draft(
        &self,
        db: &PgPool,
        resume_id: Uuid,
        saved: ResumeContent,
        mut draft: ResumeContent,
    ) -> Result<(), AppError> {
        // A saver can stop between lookup and send; the second attempt gets a fresh one.
        for _ in 0..2 {
            let saver = {
                let mut savers = self.lock()?;
                savers.retain(|_, saver| saver.is_running());
                savers
                    .entry(resume_id)
                    .or_insert_with(|| {
                        info!(resume_id = %resume_id, "Starting draft autosave");
                        Arc::new(Autosaver::spawn(
                            ResumeStoreSink::new(db.clone(), resume_id),
                            AutosavePolicy::default(),
                            Some(saved.clone()),
                        ))
                    })
                    .clone()
            };
            match saver.push(draft).await {
                Ok(()) => return Ok(()),
                Err(returned) => {
                    self.lock()?.remove(&resume_id);
                    draft = returned;
                }
            }
        }
        Err(AppError::Internal(anyhow::anyhow!(
            "autosave for resume {resume_id} could not be started"
        )))
    }

    /// Tells a running saver that the stored content was written elsewhere.
    pub async fn rebase(&self, resume_id: Uuid, stored: ResumeContent) {
        let saver = match self.lock() {
            Ok(savers) => savers.get(&resume_id).cloned(),
            Err(_) => None,
        };
        if let Some(saver) = saver {
            if !saver.rebase(stored).await {
                debug!(resume_id = %resume_id, "Draft saver already stopped");
            }
        }
    }

    /// Drops the saver for a deleted resume.
    pub fn forget(&self, resume_id: Uuid) {
        if let Ok(mut savers) = self.savers.lock() {
            savers.remove(&resume_id);
        }
    }
}
