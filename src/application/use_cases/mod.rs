pub mod get_status;
pub mod get_summary;
pub mod list_documents;
pub mod upload_document;

pub use get_status::GetStatusUseCase;
pub use get_summary::GetSummaryUseCase;
pub use list_documents::ListDocumentsUseCase;
pub use upload_document::UploadDocumentUseCase;
