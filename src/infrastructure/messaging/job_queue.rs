use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::application::ports::job_queue::{JobQueue, JobQueueError, SummarizeJob};

pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// How long an enqueue will wait on a full queue before giving up.
const ENQUEUE_WAIT: Duration = Duration::from_secs(5);

/// Bounded in-process queue. Capacity caps the number of buffered jobs so a
/// burst of uploads backpressures instead of growing without limit.
pub struct BoundedJobQueue {
    sender: mpsc::Sender<SummarizeJob>,
}

/// Receiving side handed to the background processor. Shared by all workers
/// behind a mutex so each job is delivered to exactly one of them.
pub struct JobQueueReceiver {
    receiver: Arc<Mutex<mpsc::Receiver<SummarizeJob>>>,
}

impl BoundedJobQueue {
    pub fn create_pair(capacity: usize) -> (Self, JobQueueReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));

        let queue = Self { sender };
        let queue_receiver = JobQueueReceiver {
            receiver: Arc::new(Mutex::new(receiver)),
        };

        (queue, queue_receiver)
    }
}

impl JobQueueReceiver {
    pub async fn recv(&self) -> Option<SummarizeJob> {
        let mut receiver = self.receiver.lock().await;
        receiver.recv().await
    }
}

#[async_trait]
impl JobQueue for BoundedJobQueue {
    async fn enqueue(&self, job: SummarizeJob) -> Result<(), JobQueueError> {
        match self.sender.try_send(job) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(JobQueueError::QueueClosed),
            Err(mpsc::error::TrySendError::Full(job)) => {
                match tokio::time::timeout(ENQUEUE_WAIT, self.sender.send(job)).await {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(_)) => Err(JobQueueError::QueueClosed),
                    Err(_) => Err(JobQueueError::EnqueueFailed(format!(
                        "queue full after waiting {}s",
                        ENQUEUE_WAIT.as_secs()
                    ))),
                }
            }
        }
    }
}
