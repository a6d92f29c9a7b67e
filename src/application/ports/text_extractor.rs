use async_trait::async_trait;

#[derive(Debug)]
pub enum TextExtractionError {
    FetchFailed(String),
    CorruptedFile(String),
    ExtractionFailed(String),
    InvalidContent(String),
}

impl std::fmt::Display for TextExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextExtractionError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
            TextExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            TextExtractionError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
            TextExtractionError::InvalidContent(msg) => write!(f, "Invalid content: {}", msg),
        }
    }
}

impl std::error::Error for TextExtractionError {}

#[derive(Debug, Clone, Default)]
pub struct ExtractedMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub file_size: usize,
    pub extraction_method: String,
}

/// Raw text pulled from one document, plus the windowed chunks used to feed
/// size-limited summarization backends.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub page_count: i32,
    pub word_count: i32,
    pub chunks: Vec<String>,
    pub metadata: ExtractedMetadata,
}

/// Minimum-content gate applied before summarization: trimmed text of at
/// least 50 characters and at least 10 words.
pub fn validate_extracted(content: &ExtractedDocument) -> Result<(), TextExtractionError> {
    if content.text.trim().len() < 50 {
        return Err(TextExtractionError::InvalidContent(
            "Extracted text is too short or empty".to_string(),
        ));
    }
    if content.word_count < 10 {
        return Err(TextExtractionError::InvalidContent(
            "Document must contain at least 10 words".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(
        &self,
        file_url: &str,
        file_name: &str,
    ) -> Result<ExtractedDocument, TextExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(text: &str) -> ExtractedDocument {
        ExtractedDocument {
            word_count: text.split_whitespace().count() as i32,
            text: text.to_string(),
            page_count: 1,
            chunks: vec![text.to_string()],
            metadata: ExtractedMetadata::default(),
        }
    }

    #[test]
    fn test_validate_accepts_sufficient_content() {
        let content = extracted(
            "The quarterly report covers revenue, expenses, hiring plans and product milestones in detail.",
        );
        assert!(validate_extracted(&content).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_text() {
        let content = extracted("too short");
        assert!(validate_extracted(&content).is_err());
    }

    #[test]
    fn test_validate_rejects_low_word_count() {
        // 50+ characters but fewer than 10 words
        let content = extracted("aaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbb cccccccccccccccc dddd");
        assert!(validate_extracted(&content).is_err());
    }

    #[test]
    fn test_validate_trims_before_length_check() {
        let padded = format!("   {}   ", "word ".repeat(4).trim());
        let content = extracted(&padded);
        assert!(validate_extracted(&content).is_err());
    }
}
