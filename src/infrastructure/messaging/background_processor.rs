use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::application::services::DocumentProcessorService;
use crate::domain::repositories::{DocumentRepository, ProcessingLogRepository};
use crate::domain::value_objects::{LogStatus, PipelineStage};
use crate::infrastructure::messaging::JobQueueReceiver;

pub const DEFAULT_WORKER_COUNT: usize = 3;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Documents still in `processing` after this long are presumed orphaned by
/// a crashed or killed worker and are failed by the sweeper.
const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(10 * 60);

/// Drives the summarization pipeline: a pool of workers pulling jobs off the
/// shared queue, plus a sweeper that fails documents stuck in `processing`.
#[derive(Clone)]
pub struct BackgroundProcessor {
    job_receiver: Arc<JobQueueReceiver>,
    document_processor: Arc<DocumentProcessorService>,
    document_repository: Arc<dyn DocumentRepository>,
    log_repository: Arc<dyn ProcessingLogRepository>,
    worker_count: usize,
    stale_after: Duration,
}

impl BackgroundProcessor {
    pub fn new(
        job_receiver: Arc<JobQueueReceiver>,
        document_processor: Arc<DocumentProcessorService>,
        document_repository: Arc<dyn DocumentRepository>,
        log_repository: Arc<dyn ProcessingLogRepository>,
    ) -> Self {
        Self {
            job_receiver,
            document_processor,
            document_repository,
            log_repository,
            worker_count: DEFAULT_WORKER_COUNT,
            stale_after: DEFAULT_STALE_AFTER,
        }
    }

    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count.max(1);
        self
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    pub async fn start(&self) {
        tracing::info!(
            "Starting background processor with {} workers",
            self.worker_count
        );

        let sweeper = self.clone();
        tokio::spawn(async move {
            sweeper.sweeper_loop().await;
        });

        let mut handles = Vec::new();
        for worker_id in 0..self.worker_count {
            let worker = self.clone();
            let handle = tokio::spawn(async move {
                worker.worker_loop(worker_id).await;
            });
            handles.push(handle);
        }

        for (worker_id, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                tracing::error!("Worker {} panicked: {}", worker_id, e);
            }
        }

        tracing::info!("Background processor stopped");
    }

    async fn worker_loop(&self, worker_id: usize) {
        tracing::info!("Worker {} started", worker_id);

        while let Some(job) = self.job_receiver.recv().await {
            tracing::info!(
                "Worker {} processing document {}",
                worker_id,
                job.document_id
            );

            let result = self.document_processor.process(job.document_id).await;

            if result.success {
                tracing::info!(
                    "Worker {} finished document {} in {}s",
                    worker_id,
                    job.document_id,
                    result.processing_time_seconds
                );
            } else {
                tracing::warn!(
                    "Worker {} failed document {}: {}",
                    worker_id,
                    job.document_id,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        tracing::info!("Worker {} stopped, queue closed", worker_id);
    }

    async fn sweeper_loop(&self) {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.sweep_stale_documents().await;
        }
    }

    async fn sweep_stale_documents(&self) {
        let cutoff = chrono::Utc::now()
            - chrono::Duration::from_std(self.stale_after).unwrap_or(chrono::Duration::zero());

        let stale = match self.document_repository.find_stale_processing(cutoff).await {
            Ok(stale) => stale,
            Err(e) => {
                tracing::error!("Stale document sweep query failed: {}", e);
                return;
            }
        };

        for mut document in stale {
            tracing::warn!(
                "Sweeping document {} stuck in processing since {}",
                document.id(),
                document.updated_at()
            );

            if let Err(e) = document.fail_processing() {
                tracing::error!("Failed to mark stale document {}: {}", document.id(), e);
                continue;
            }
            if let Err(e) = self.document_repository.update(&document).await {
                tracing::error!(
                    "Failed to persist swept status for {}: {}",
                    document.id(),
                    e
                );
                continue;
            }

            let log = crate::domain::entities::ProcessingLog::new(
                document.id(),
                PipelineStage::Error,
                LogStatus::Error,
                Some("Processing exceeded the stuck-document deadline".to_string()),
                Some(json!({ "errorType": "Timeout" })),
            );
            if let Err(e) = self.log_repository.append(&log).await {
                tracing::error!("Failed to append sweep log for {}: {}", document.id(), e);
            }
        }
    }
}
