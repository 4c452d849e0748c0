//! Background worker that owns a [`Session`].
//!
//! Front-ends talk to the worker through a [`WorkerHandle`]. Requests queue
//! on a bounded channel and are handled strictly one at a time, each answered
//! on its own oneshot reply channel. The worker stops on
//! [`Submission::Shutdown`] or when every handle has been dropped, and hands
//! the session back through its join handle.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::session::Session;

/// A request for the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Text(String),
    Generate { text: String, force: bool },
    Rebuild,
    Shutdown,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkerError {
    #[error("Worker queue is full")]
    QueueFull,

    #[error("Worker has stopped")]
    Stopped,
}

struct Job {
    submission: Submission,
    reply: oneshot::Sender<String>,
}

/// A reply that has not arrived yet.
pub struct PendingReply(oneshot::Receiver<String>);

impl PendingReply {
    pub async fn wait(self) -> Result<String, WorkerError> {
        self.0.await.map_err(|_| WorkerError::Stopped)
    }
}

/// Cloneable sender side of a worker.
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Job>,
}

impl WorkerHandle {
    /// Queue a request, waiting for room, and wait for its reply.
    pub async fn send(&self, submission: Submission) -> Result<String, WorkerError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Job { submission, reply })
            .await
            .map_err(|_| WorkerError::Stopped)?;
        PendingReply(rx).wait().await
    }

    /// Queue a request without waiting for room.
    pub fn try_send(&self, submission: Submission) -> Result<PendingReply, WorkerError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .try_send(Job { submission, reply })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => WorkerError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => WorkerError::Stopped,
            })?;
        Ok(PendingReply(rx))
    }

    pub async fn submit(&self, text: impl Into<String>) -> Result<String, WorkerError> {
        self.send(Submission::Text(text.into())).await
    }

    pub async fn generate(
        &self,
        text: impl Into<String>,
        force: bool,
    ) -> Result<String, WorkerError> {
        self.send(Submission::Generate {
            text: text.into(),
            force,
        })
        .await
    }

    pub async fn rebuild(&self) -> Result<String, WorkerError> {
        self.send(Submission::Rebuild).await
    }

    pub async fn shutdown(&self) -> Result<(), WorkerError> {
        self.send(Submission::Shutdown).await.map(|_| ())
    }

    pub fn try_submit(&self, text: impl Into<String>) -> Result<PendingReply, WorkerError> {
        self.try_send(Submission::Text(text.into()))
    }

    pub fn try_generate(
        &self,
        text: impl Into<String>,
        force: bool,
    ) -> Result<PendingReply, WorkerError> {
        self.try_send(Submission::Generate {
            text: text.into(),
            force,
        })
    }

    pub fn try_rebuild(&self) -> Result<PendingReply, WorkerError> {
        self.try_send(Submission::Rebuild)
    }

    pub fn is_stopped(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Move `session` onto a new task with a queue of `capacity` requests.
pub fn spawn_worker(session: Session, capacity: usize) -> (WorkerHandle, JoinHandle<Session>) {
    let (tx, mut rx) = mpsc::channel::<Job>(capacity.max(1));

    let handle = tokio::spawn(async move {
        let mut session = session;
        info!("Worker started");

        while let Some(Job { submission, reply }) = rx.recv().await {
            let output = match submission {
                Submission::Text(text) => session.submit(&text).await,
                Submission::Generate { text, force } => session.generate(&text, force).await,
                Submission::Rebuild => session.rebuild().await,
                Submission::Shutdown => {
                    let _ = reply.send(String::new());
                    break;
                }
            };

            if reply.send(output).is_err() {
                debug!("Requester went away before the reply");
            }
        }

        info!("Worker stopped");
        session
    });

    (WorkerHandle { tx }, handle)
}
