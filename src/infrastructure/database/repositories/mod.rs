pub mod postgres_document_repository;
pub mod postgres_log_repository;
pub mod postgres_summary_repository;
pub mod postgres_user_repository;

pub use postgres_document_repository::PostgresDocumentRepository;
pub use postgres_log_repository::PostgresLogRepository;
pub use postgres_summary_repository::PostgresSummaryRepository;
pub use postgres_user_repository::PostgresUserRepository;
