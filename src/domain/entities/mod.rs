pub mod document;
pub mod processing_log;
pub mod summary;
pub mod user;

pub use document::Document;
pub use processing_log::ProcessingLog;
pub use summary::Summary;
pub use user::User;
