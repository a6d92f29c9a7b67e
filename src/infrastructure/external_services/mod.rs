pub mod chat_summarizer;
pub mod offline_summarizer;
pub mod pdf_text_extractor;

pub use chat_summarizer::ChatSummarizer;
pub use offline_summarizer::OfflineSummarizer;
pub use pdf_text_extractor::PdfTextExtractor;
