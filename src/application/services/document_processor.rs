use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use uuid::Uuid;

use crate::application::ports::summarizer::{GeneratedSummary, SummaryOptions};
use crate::application::ports::text_extractor::{ExtractedDocument, validate_extracted};
use crate::application::ports::{Summarizer, TextExtractor};
use crate::domain::entities::{Document, ProcessingLog, Summary};
use crate::domain::repositories::{DocumentRepository, ProcessingLogRepository, SummaryRepository};
use crate::domain::value_objects::{LogStatus, PipelineStage};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug)]
pub enum ProcessingError {
    NotFound(Uuid),
    AlreadyProcessed(Uuid),
    Extraction(String),
    Summarization(String),
    Persistence(String),
    Timeout(String),
}

impl ProcessingError {
    /// Short machine-readable kind persisted as `errorType` in the error
    /// log row's metadata.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProcessingError::NotFound(_) => "NotFound",
            ProcessingError::AlreadyProcessed(_) => "AlreadyProcessed",
            ProcessingError::Extraction(_) => "ExtractionFailure",
            ProcessingError::Summarization(_) => "SummarizationFailure",
            ProcessingError::Persistence(_) => "PersistenceFailure",
            ProcessingError::Timeout(_) => "Timeout",
        }
    }
}

impl std::fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingError::NotFound(id) => write!(f, "Document not found: {}", id),
            ProcessingError::AlreadyProcessed(id) => {
                write!(f, "Document already processed or in progress: {}", id)
            }
            ProcessingError::Extraction(msg) => write!(f, "Extraction error: {}", msg),
            ProcessingError::Summarization(msg) => write!(f, "Summarization error: {}", msg),
            ProcessingError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
            ProcessingError::Timeout(msg) => write!(f, "Timed out: {}", msg),
        }
    }
}

impl std::error::Error for ProcessingError {}

/// Outcome of one pipeline run. `process` never raises past its own
/// boundary; callers always receive one of these.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub success: bool,
    pub document_id: Uuid,
    pub summary_id: Option<Uuid>,
    pub error: Option<String>,
    pub error_type: Option<&'static str>,
    pub processing_time_seconds: i32,
    pub extraction_method: String,
    pub ai_model: String,
}

/// Drives a single document from `uploaded` to a terminal state, producing
/// a summary and an audit trail. Each step's write is individually durable;
/// there is no surrounding transaction.
pub struct DocumentProcessorService {
    document_repository: Arc<dyn DocumentRepository>,
    summary_repository: Arc<dyn SummaryRepository>,
    log_repository: Arc<dyn ProcessingLogRepository>,
    text_extractor: Arc<dyn TextExtractor>,
    summarizer: Arc<dyn Summarizer>,
    call_timeout: Duration,
}

impl DocumentProcessorService {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        summary_repository: Arc<dyn SummaryRepository>,
        log_repository: Arc<dyn ProcessingLogRepository>,
        text_extractor: Arc<dyn TextExtractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            document_repository,
            summary_repository,
            log_repository,
            text_extractor,
            summarizer,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub async fn process(&self, document_id: Uuid) -> ProcessingResult {
        let start_time = Instant::now();
        tracing::info!("Starting document processing for {}", document_id);

        let mut document = match self.document_repository.find_by_id(document_id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                // No state mutation for an unknown id.
                return Self::failure_result(
                    document_id,
                    &ProcessingError::NotFound(document_id),
                    start_time,
                );
            }
            Err(e) => {
                return Self::failure_result(
                    document_id,
                    &ProcessingError::Persistence(e.to_string()),
                    start_time,
                );
            }
        };

        if !document.is_processable() {
            // Retry safety: a second run for the same document is rejected
            // instead of racing the first one into a duplicate summary.
            tracing::warn!(
                "Rejecting repeat processing of {} in status {}",
                document_id,
                document.status()
            );
            return Self::failure_result(
                document_id,
                &ProcessingError::AlreadyProcessed(document_id),
                start_time,
            );
        }

        match self.run_pipeline(&mut document, start_time).await {
            Ok((summary, extraction_method)) => {
                let processing_time = start_time.elapsed().as_secs() as i32;
                tracing::info!(
                    "Document {} processed in {}s (summary {})",
                    document_id,
                    processing_time,
                    summary.id()
                );
                ProcessingResult {
                    success: true,
                    document_id,
                    summary_id: Some(summary.id()),
                    error: None,
                    error_type: None,
                    processing_time_seconds: processing_time,
                    extraction_method,
                    ai_model: self.summarizer.model_id().to_string(),
                }
            }
            Err(error) => {
                self.record_failure(&mut document, &error, start_time).await;
                Self::failure_result(document_id, &error, start_time)
            }
        }
    }

    async fn run_pipeline(
        &self,
        document: &mut Document,
        start_time: Instant,
    ) -> Result<(Summary, String), ProcessingError> {
        let document_id = document.id();

        self.append_log(ProcessingLog::new(
            document_id,
            PipelineStage::Extraction,
            LogStatus::Started,
            Some("Starting PDF text extraction".to_string()),
            None,
        ))
        .await?;

        document
            .start_processing()
            .map_err(ProcessingError::Persistence)?;
        self.update_document(document).await?;

        let extracted = self.extract(document).await?;
        validate_extracted(&extracted).map_err(|e| ProcessingError::Extraction(e.to_string()))?;
        let extraction_method = extracted.metadata.extraction_method.clone();

        self.append_log(ProcessingLog::new(
            document_id,
            PipelineStage::Extraction,
            LogStatus::Completed,
            Some(format!(
                "PDF text extraction completed using {}",
                extraction_method
            )),
            Some(json!({
                "pageCount": extracted.page_count,
                "wordCount": extracted.word_count,
                "textLength": extracted.text.len(),
                "chunksCount": extracted.chunks.len(),
                "extractionMethod": extraction_method,
                "title": extracted.metadata.title,
                "author": extracted.metadata.author,
            })),
        ))
        .await?;

        self.append_log(ProcessingLog::new(
            document_id,
            PipelineStage::Analysis,
            LogStatus::Started,
            Some("Starting AI analysis and summarization".to_string()),
            None,
        ))
        .await?;

        let generated = self.summarize(document, &extracted).await?;

        self.append_log(ProcessingLog::new(
            document_id,
            PipelineStage::Analysis,
            LogStatus::Completed,
            Some("AI analysis and summarization completed".to_string()),
            Some(json!({
                "wordCount": generated.word_count,
                "keyPointsCount": generated.key_points.len(),
                "actionItemsCount": generated.action_items.len(),
                "tagsCount": generated.tags.len(),
                "title": generated.title,
            })),
        ))
        .await?;

        let summary = Summary::new(
            document_id,
            generated.title,
            generated.content,
            generated.key_points,
            generated.action_items,
            generated.tags,
            generated.word_count,
            start_time.elapsed().as_secs() as i32,
            self.summarizer.model_id().to_string(),
        );
        self.summary_repository
            .upsert(&summary)
            .await
            .map_err(|e| ProcessingError::Persistence(e.to_string()))?;

        document
            .complete_processing()
            .map_err(ProcessingError::Persistence)?;
        self.update_document(document).await?;

        let total_time = start_time.elapsed().as_secs() as i32;
        self.append_log(ProcessingLog::new(
            document_id,
            PipelineStage::SummaryGeneration,
            LogStatus::Completed,
            Some("Document processing completed successfully".to_string()),
            Some(json!({
                "summaryId": summary.id(),
                "processingTime": total_time,
                "extractionMethod": extraction_method,
                "totalWordCount": extracted.word_count,
                "summaryWordCount": summary.word_count(),
            })),
        ))
        .await?;

        Ok((summary, extraction_method))
    }

    async fn extract(&self, document: &Document) -> Result<ExtractedDocument, ProcessingError> {
        tokio::time::timeout(
            self.call_timeout,
            self.text_extractor
                .extract(document.file_url(), document.file_name()),
        )
        .await
        .map_err(|_| ProcessingError::Timeout("text extraction".to_string()))?
        .map_err(|e| ProcessingError::Extraction(e.to_string()))
    }

    async fn summarize(
        &self,
        document: &Document,
        extracted: &ExtractedDocument,
    ) -> Result<GeneratedSummary, ProcessingError> {
        tokio::time::timeout(
            self.call_timeout,
            self.summarizer.summarize(
                &extracted.text,
                document.file_name(),
                SummaryOptions::default(),
            ),
        )
        .await
        .map_err(|_| ProcessingError::Timeout("summarization".to_string()))?
        .map_err(|e| ProcessingError::Summarization(e.to_string()))
    }

    /// Top-level failure handler: move the document to `error` and append
    /// the final error log row. Secondary persistence failures here are
    /// logged and swallowed so `process` can still return a result.
    async fn record_failure(
        &self,
        document: &mut Document,
        error: &ProcessingError,
        start_time: Instant,
    ) {
        tracing::error!("Document processing failed for {}: {}", document.id(), error);

        if document.status().is_processing() {
            if let Err(e) = document.fail_processing() {
                tracing::error!("Failed to mark document {} as error: {}", document.id(), e);
            } else if let Err(e) = self.document_repository.update(document).await {
                tracing::error!("Failed to persist error status for {}: {}", document.id(), e);
            }
        }

        let log = ProcessingLog::new(
            document.id(),
            PipelineStage::Error,
            LogStatus::Error,
            Some(error.to_string()),
            Some(json!({
                "processingTime": start_time.elapsed().as_secs(),
                "errorType": error.error_type(),
            })),
        );
        if let Err(e) = self.log_repository.append(&log).await {
            tracing::error!("Failed to append error log for {}: {}", document.id(), e);
        }
    }

    async fn append_log(&self, log: ProcessingLog) -> Result<(), ProcessingError> {
        self.log_repository
            .append(&log)
            .await
            .map_err(|e| ProcessingError::Persistence(e.to_string()))
    }

    async fn update_document(&self, document: &Document) -> Result<(), ProcessingError> {
        self.document_repository
            .update(document)
            .await
            .map_err(|e| ProcessingError::Persistence(e.to_string()))
    }

    fn failure_result(
        document_id: Uuid,
        error: &ProcessingError,
        start_time: Instant,
    ) -> ProcessingResult {
        ProcessingResult {
            success: false,
            document_id,
            summary_id: None,
            error: Some(error.to_string()),
            error_type: Some(error.error_type()),
            processing_time_seconds: start_time.elapsed().as_secs() as i32,
            extraction_method: "failed".to_string(),
            ai_model: "none".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::summarizer::SummarizerError;
    use crate::application::ports::text_extractor::{ExtractedMetadata, TextExtractionError};
    use crate::domain::repositories::document_repository::DocumentRepositoryError;
    use crate::domain::repositories::processing_log_repository::ProcessingLogRepositoryError;
    use crate::domain::repositories::summary_repository::SummaryRepositoryError;

    #[derive(Default)]
    struct InMemoryDocuments {
        rows: Mutex<HashMap<Uuid, Document>>,
    }

    #[async_trait]
    impl DocumentRepository for InMemoryDocuments {
        async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
            self.rows
                .lock()
                .unwrap()
                .insert(document.id(), document.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: Uuid,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_user_id(
            &self,
            user_id: Uuid,
        ) -> Result<Vec<Document>, DocumentRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|d| d.user_id() == user_id)
                .cloned()
                .collect())
        }

        async fn update(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
            self.rows
                .lock()
                .unwrap()
                .insert(document.id(), document.clone());
            Ok(())
        }

        async fn find_stale_processing(
            &self,
            older_than: chrono::DateTime<chrono::Utc>,
        ) -> Result<Vec<Document>, DocumentRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|d| d.status().is_processing() && d.updated_at() < older_than)
                .cloned()
                .collect())
        }

    }

    #[derive(Default)]
    struct InMemorySummaries {
        rows: Mutex<HashMap<Uuid, Summary>>,
    }

    #[async_trait]
    impl SummaryRepository for InMemorySummaries {
        async fn upsert(&self, summary: &Summary) -> Result<(), SummaryRepositoryError> {
            self.rows
                .lock()
                .unwrap()
                .insert(summary.document_id(), summary.clone());
            Ok(())
        }

        async fn find_by_document_id(
            &self,
            document_id: Uuid,
        ) -> Result<Option<Summary>, SummaryRepositoryError> {
            Ok(self.rows.lock().unwrap().get(&document_id).cloned())
        }

        async fn find_by_id_or_document_id(
            &self,
            id: Uuid,
        ) -> Result<Option<Summary>, SummaryRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|s| s.id() == id || s.document_id() == id)
                .cloned())
        }
    }

    #[derive(Default)]
    struct InMemoryLogs {
        rows: Mutex<Vec<ProcessingLog>>,
    }

    #[async_trait]
    impl ProcessingLogRepository for InMemoryLogs {
        async fn append(&self, log: &ProcessingLog) -> Result<(), ProcessingLogRepositoryError> {
            self.rows.lock().unwrap().push(log.clone());
            Ok(())
        }

        async fn find_by_document_id(
            &self,
            document_id: Uuid,
        ) -> Result<Vec<ProcessingLog>, ProcessingLogRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.document_id() == document_id)
                .cloned()
                .collect())
        }
    }

    struct FakeExtractor {
        result: Result<String, String>,
    }

    #[async_trait]
    impl TextExtractor for FakeExtractor {
        async fn extract(
            &self,
            _file_url: &str,
            _file_name: &str,
        ) -> Result<ExtractedDocument, TextExtractionError> {
            match &self.result {
                Ok(text) => Ok(ExtractedDocument {
                    word_count: text.split_whitespace().count() as i32,
                    text: text.clone(),
                    page_count: 3,
                    chunks: vec![text.clone()],
                    metadata: ExtractedMetadata {
                        title: Some("Sample".to_string()),
                        author: None,
                        file_size: text.len(),
                        extraction_method: "lopdf-text-layer".to_string(),
                    },
                }),
                Err(msg) => Err(TextExtractionError::FetchFailed(msg.clone())),
            }
        }
    }

    struct FakeSummarizer {
        available: bool,
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn summarize(
            &self,
            _text: &str,
            file_name: &str,
            _options: SummaryOptions,
        ) -> Result<GeneratedSummary, SummarizerError> {
            if !self.available {
                return Err(SummarizerError::Unavailable("connection refused".to_string()));
            }
            Ok(GeneratedSummary {
                title: format!("Summary of {}", file_name),
                content: "A concise summary of the document.".to_string(),
                key_points: vec!["Point one".to_string()],
                action_items: vec!["Do the thing".to_string()],
                tags: vec!["report".to_string()],
                word_count: 6,
            })
        }

        fn model_id(&self) -> &str {
            "fake-model"
        }
    }

    struct Harness {
        documents: Arc<InMemoryDocuments>,
        summaries: Arc<InMemorySummaries>,
        logs: Arc<InMemoryLogs>,
        processor: DocumentProcessorService,
    }

    fn harness(extractor: FakeExtractor, summarizer: FakeSummarizer) -> Harness {
        let documents = Arc::new(InMemoryDocuments::default());
        let summaries = Arc::new(InMemorySummaries::default());
        let logs = Arc::new(InMemoryLogs::default());
        let processor = DocumentProcessorService::new(
            documents.clone(),
            summaries.clone(),
            logs.clone(),
            Arc::new(extractor),
            Arc::new(summarizer),
        );
        Harness {
            documents,
            summaries,
            logs,
            processor,
        }
    }

    fn long_text() -> String {
        "The quarterly report covers revenue, expenses, hiring plans and product \
         milestones in considerable detail across all regions."
            .to_string()
    }

    async fn seed_document(h: &Harness) -> Uuid {
        let document = Document::new(
            Uuid::new_v4(),
            "report.pdf".to_string(),
            "https://files.example/report.pdf".to_string(),
            512_000,
            "key123".to_string(),
        );
        h.documents.save(&document).await.unwrap();
        document.id()
    }

    #[tokio::test]
    async fn test_successful_run() {
        let h = harness(
            FakeExtractor {
                result: Ok(long_text()),
            },
            FakeSummarizer { available: true },
        );
        let document_id = seed_document(&h).await;

        let result = h.processor.process(document_id).await;

        assert!(result.success);
        assert_eq!(result.document_id, document_id);
        assert_eq!(result.ai_model, "fake-model");
        assert_eq!(result.extraction_method, "lopdf-text-layer");

        let document = h.documents.find_by_id(document_id).await.unwrap().unwrap();
        assert!(document.status().is_completed());

        let summary = h
            .summaries
            .find_by_document_id(document_id)
            .await
            .unwrap()
            .expect("summary row must exist after a completed run");
        assert_eq!(summary.document_id(), document_id);
        assert_eq!(Some(summary.id()), result.summary_id);
        assert!(summary.word_count() > 0);
    }

    #[tokio::test]
    async fn test_successful_run_log_trace() {
        let h = harness(
            FakeExtractor {
                result: Ok(long_text()),
            },
            FakeSummarizer { available: true },
        );
        let document_id = seed_document(&h).await;
        h.processor.process(document_id).await;

        let logs = h.logs.find_by_document_id(document_id).await.unwrap();
        let trace: Vec<(PipelineStage, LogStatus)> =
            logs.iter().map(|l| (l.stage(), l.status())).collect();

        assert_eq!(
            trace,
            vec![
                (PipelineStage::Extraction, LogStatus::Started),
                (PipelineStage::Extraction, LogStatus::Completed),
                (PipelineStage::Analysis, LogStatus::Started),
                (PipelineStage::Analysis, LogStatus::Completed),
                (PipelineStage::SummaryGeneration, LogStatus::Completed),
            ]
        );

        // Rows written in strict program order
        for pair in logs.windows(2) {
            assert!(pair[0].created_at() <= pair[1].created_at());
        }

        let extraction_meta = logs[1].metadata().unwrap();
        assert_eq!(extraction_meta["extractionMethod"], "lopdf-text-layer");
        assert_eq!(extraction_meta["pageCount"], 3);
    }

    #[tokio::test]
    async fn test_extraction_failure_moves_document_to_error() {
        let h = harness(
            FakeExtractor {
                result: Err("404 Not Found".to_string()),
            },
            FakeSummarizer { available: true },
        );
        let document_id = seed_document(&h).await;

        let result = h.processor.process(document_id).await;

        assert!(!result.success);
        assert_eq!(result.extraction_method, "failed");
        assert_eq!(result.ai_model, "none");
        assert_eq!(result.error_type, Some("ExtractionFailure"));

        let document = h.documents.find_by_id(document_id).await.unwrap().unwrap();
        assert!(document.status().is_error());
        assert!(
            h.summaries
                .find_by_document_id(document_id)
                .await
                .unwrap()
                .is_none()
        );

        let logs = h.logs.find_by_document_id(document_id).await.unwrap();
        let error_log = logs
            .iter()
            .find(|l| l.stage() == PipelineStage::Error)
            .expect("error log row must exist");
        assert_eq!(error_log.status(), LogStatus::Error);
        assert_eq!(error_log.metadata().unwrap()["errorType"], "ExtractionFailure");
    }

    #[tokio::test]
    async fn test_short_extracted_text_fails_as_extraction_failure() {
        let h = harness(
            FakeExtractor {
                result: Ok("too short".to_string()),
            },
            FakeSummarizer { available: true },
        );
        let document_id = seed_document(&h).await;

        let result = h.processor.process(document_id).await;

        assert!(!result.success);
        assert_eq!(result.error_type, Some("ExtractionFailure"));
        let document = h.documents.find_by_id(document_id).await.unwrap().unwrap();
        assert!(document.status().is_error());
    }

    #[tokio::test]
    async fn test_unreachable_summarizer_fails_pipeline() {
        let h = harness(
            FakeExtractor {
                result: Ok(long_text()),
            },
            FakeSummarizer { available: false },
        );
        let document_id = seed_document(&h).await;

        let result = h.processor.process(document_id).await;

        assert!(!result.success);
        assert_eq!(result.error_type, Some("SummarizationFailure"));
        let document = h.documents.find_by_id(document_id).await.unwrap().unwrap();
        assert!(document.status().is_error());
        assert!(
            h.summaries
                .find_by_document_id(document_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_unknown_document_mutates_nothing() {
        let h = harness(
            FakeExtractor {
                result: Ok(long_text()),
            },
            FakeSummarizer { available: true },
        );

        let result = h.processor.process(Uuid::new_v4()).await;

        assert!(!result.success);
        assert_eq!(result.error_type, Some("NotFound"));
        assert!(h.logs.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeat_processing_is_rejected() {
        let h = harness(
            FakeExtractor {
                result: Ok(long_text()),
            },
            FakeSummarizer { available: true },
        );
        let document_id = seed_document(&h).await;

        let first = h.processor.process(document_id).await;
        assert!(first.success);

        let second = h.processor.process(document_id).await;
        assert!(!second.success);
        assert_eq!(second.error_type, Some("AlreadyProcessed"));

        // Still exactly one summary for the document
        assert_eq!(h.summaries.rows.lock().unwrap().len(), 1);
        let document = h.documents.find_by_id(document_id).await.unwrap().unwrap();
        assert!(document.status().is_completed());
    }
}
