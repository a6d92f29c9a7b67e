pub mod document_repository;
pub mod processing_log_repository;
pub mod summary_repository;
pub mod user_repository;

pub use document_repository::DocumentRepository;
pub use processing_log_repository::ProcessingLogRepository;
pub use summary_repository::SummaryRepository;
pub use user_repository::UserRepository;
