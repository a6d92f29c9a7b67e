pub mod document_handler;
pub mod summary_handler;

pub use document_handler::DocumentHandler;
pub use summary_handler::SummaryHandler;
