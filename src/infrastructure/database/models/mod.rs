pub mod document_model;
pub mod log_model;
pub mod summary_model;
pub mod user_model;

pub use document_model::{DocumentModel, NewDocumentModel};
pub use log_model::{NewProcessingLogModel, ProcessingLogModel};
pub use summary_model::{NewSummaryModel, SummaryModel};
pub use user_model::{NewUserModel, UserModel};
