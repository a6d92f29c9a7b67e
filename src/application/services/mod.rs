pub mod document_processor;

pub use document_processor::{DocumentProcessorService, ProcessingResult};
