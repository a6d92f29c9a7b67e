pub mod file_storage;
pub mod job_queue;
pub mod summarizer;
pub mod text_extractor;

pub use file_storage::FileStorage;
pub use job_queue::JobQueue;
pub use summarizer::Summarizer;
pub use text_extractor::TextExtractor;
