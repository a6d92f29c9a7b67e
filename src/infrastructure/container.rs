use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::{
    application::{
        ports::{FileStorage, JobQueue, Summarizer, TextExtractor},
        services::DocumentProcessorService,
        use_cases::{
            GetStatusUseCase, GetSummaryUseCase, ListDocumentsUseCase, UploadDocumentUseCase,
        },
    },
    domain::repositories::{
        DocumentRepository, ProcessingLogRepository, SummaryRepository, UserRepository,
    },
    infrastructure::{
        database::{
            connection::{create_connection_pool, get_database_connection, run_migrations},
            repositories::{
                PostgresDocumentRepository, PostgresLogRepository, PostgresSummaryRepository,
                PostgresUserRepository,
            },
        },
        external_services::{
            ChatSummarizer, OfflineSummarizer, PdfTextExtractor,
            chat_summarizer::{DEFAULT_API_URL, DEFAULT_MODEL},
        },
        file_system::LocalFileStorage,
        messaging::{BackgroundProcessor, BoundedJobQueue, job_queue::DEFAULT_QUEUE_CAPACITY},
    },
    presentation::http::handlers::{DocumentHandler, SummaryHandler},
};

pub struct AppContainer {
    // Repositories
    pub document_repository: Arc<dyn DocumentRepository>,
    pub summary_repository: Arc<dyn SummaryRepository>,
    pub log_repository: Arc<dyn ProcessingLogRepository>,
    pub user_repository: Arc<dyn UserRepository>,

    // External services
    pub text_extractor: Arc<dyn TextExtractor>,
    pub summarizer: Arc<dyn Summarizer>,
    pub file_storage: Arc<dyn FileStorage>,

    // Job queue and background processing
    pub job_queue: Arc<dyn JobQueue>,
    pub background_processor: Arc<BackgroundProcessor>,

    // Application services
    pub document_processor: Arc<DocumentProcessorService>,

    // Use cases
    pub upload_document_use_case: Arc<UploadDocumentUseCase>,
    pub get_status_use_case: Arc<GetStatusUseCase>,
    pub list_documents_use_case: Arc<ListDocumentsUseCase>,
    pub get_summary_use_case: Arc<GetSummaryUseCase>,

    // HTTP handlers
    pub document_handler: Arc<DocumentHandler>,
    pub summary_handler: Arc<SummaryHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool()?;
        let mut conn = get_database_connection()
            .map_err(|e| format!("Failed to create database connection: {}", e))?;
        run_migrations(&mut conn)
            .map_err(|e| format!("Failed to run database migrations: {}", e))?;

        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(db_pool.clone()));
        let summary_repository: Arc<dyn SummaryRepository> =
            Arc::new(PostgresSummaryRepository::new(db_pool.clone()));
        let log_repository: Arc<dyn ProcessingLogRepository> =
            Arc::new(PostgresLogRepository::new(db_pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(PostgresUserRepository::new(db_pool));

        let http_client = reqwest::Client::new();

        let text_extractor: Arc<dyn TextExtractor> =
            Arc::new(PdfTextExtractor::new(http_client.clone()));

        // A configured API key selects the hosted provider; without one the
        // deterministic offline summarizer keeps the pipeline functional.
        let summarizer: Arc<dyn Summarizer> = match std::env::var("SUMMARIZER_API_KEY") {
            Ok(api_key) if !api_key.trim().is_empty() => {
                let api_url = std::env::var("SUMMARIZER_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
                let model = std::env::var("SUMMARIZER_MODEL")
                    .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
                Arc::new(ChatSummarizer::new(http_client, api_url, api_key, model))
            }
            _ => {
                tracing::warn!("SUMMARIZER_API_KEY not set, using offline summarizer");
                Arc::new(OfflineSummarizer::new())
            }
        };

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()));
        let file_storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(upload_dir));

        let mut document_processor = DocumentProcessorService::new(
            document_repository.clone(),
            summary_repository.clone(),
            log_repository.clone(),
            text_extractor.clone(),
            summarizer.clone(),
        );
        if let Some(timeout_secs) = env_usize("EXTERNAL_CALL_TIMEOUT_SECS") {
            document_processor = document_processor
                .with_call_timeout(Duration::from_secs(timeout_secs as u64));
        }
        let document_processor = Arc::new(document_processor);

        let queue_capacity = env_usize("JOB_QUEUE_CAPACITY").unwrap_or(DEFAULT_QUEUE_CAPACITY);
        let (job_queue, job_receiver) = BoundedJobQueue::create_pair(queue_capacity);
        let job_queue: Arc<dyn JobQueue> = Arc::new(job_queue);
        let job_receiver = Arc::new(job_receiver);

        let mut background_processor = BackgroundProcessor::new(
            job_receiver,
            document_processor.clone(),
            document_repository.clone(),
            log_repository.clone(),
        );
        if let Some(worker_count) = env_usize("WORKER_COUNT") {
            background_processor = background_processor.with_worker_count(worker_count);
        }
        let background_processor = Arc::new(background_processor);

        let upload_document_use_case = Arc::new(UploadDocumentUseCase::new(
            document_repository.clone(),
            user_repository.clone(),
            file_storage.clone(),
            job_queue.clone(),
        ));

        let get_status_use_case = Arc::new(GetStatusUseCase::new(
            document_repository.clone(),
            summary_repository.clone(),
            user_repository.clone(),
        ));

        let list_documents_use_case = Arc::new(ListDocumentsUseCase::new(
            document_repository.clone(),
            summary_repository.clone(),
            log_repository.clone(),
            user_repository.clone(),
        ));

        let get_summary_use_case = Arc::new(GetSummaryUseCase::new(
            summary_repository.clone(),
            document_repository.clone(),
            user_repository.clone(),
        ));

        let document_handler = Arc::new(DocumentHandler::new(
            upload_document_use_case.clone(),
            get_status_use_case.clone(),
            list_documents_use_case.clone(),
        ));

        let summary_handler = Arc::new(SummaryHandler::new(get_summary_use_case.clone()));

        Ok(Self {
            document_repository,
            summary_repository,
            log_repository,
            user_repository,
            text_extractor,
            summarizer,
            file_storage,
            job_queue,
            background_processor,
            document_processor,
            upload_document_use_case,
            get_status_use_case,
            list_documents_use_case,
            get_summary_use_case,
            document_handler,
            summary_handler,
        })
    }
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
