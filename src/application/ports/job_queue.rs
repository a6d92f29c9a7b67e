use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug)]
pub enum JobQueueError {
    QueueClosed,
    EnqueueFailed(String),
}

impl std::fmt::Display for JobQueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobQueueError::QueueClosed => write!(f, "Job queue is closed"),
            JobQueueError::EnqueueFailed(msg) => write!(f, "Failed to enqueue job: {}", msg),
        }
    }
}

impl std::error::Error for JobQueueError {}

/// One unit of background work: summarize a single uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeJob {
    pub id: Uuid,
    pub document_id: Uuid,
    pub enqueued_at: DateTime<Utc>,
}

impl SummarizeJob {
    pub fn new(document_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            enqueued_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue a job. Applies backpressure when the queue is at capacity.
    async fn enqueue(&self, job: SummarizeJob) -> Result<(), JobQueueError>;
}
