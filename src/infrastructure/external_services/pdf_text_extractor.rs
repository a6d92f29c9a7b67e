use async_trait::async_trait;
use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use reqwest::Client;
use url::Url;

use crate::application::ports::text_extractor::{
    ExtractedDocument, ExtractedMetadata, TextExtractionError, TextExtractor,
};

pub const EXTRACTION_METHOD: &str = "lopdf-text-layer";

const CHUNK_SIZE: usize = 1000;
const CHUNK_OVERLAP: usize = 200;

/// Preferred break points, tried in order, when a chunk boundary falls
/// mid-text.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

pub struct PdfTextExtractor {
    client: Client,
}

impl PdfTextExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_bytes(&self, file_url: &str) -> Result<Vec<u8>, TextExtractionError> {
        let is_remote = matches!(
            Url::parse(file_url).map(|u| u.scheme().to_string()),
            Ok(scheme) if scheme == "http" || scheme == "https"
        );

        if is_remote {
            let response = self
                .client
                .get(file_url)
                .send()
                .await
                .map_err(|e| TextExtractionError::FetchFailed(e.to_string()))?;

            if !response.status().is_success() {
                return Err(TextExtractionError::FetchFailed(format!(
                    "HTTP {} fetching {}",
                    response.status(),
                    file_url
                )));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| TextExtractionError::FetchFailed(e.to_string()))?;
            Ok(bytes.to_vec())
        } else {
            tokio::fs::read(file_url)
                .await
                .map_err(|e| TextExtractionError::FetchFailed(e.to_string()))
        }
    }

    fn extract_pdf_text(&self, doc: &Document) -> Result<(String, i32), TextExtractionError> {
        let pages = doc.get_pages();
        let page_count = pages.len() as i32;

        let extracted_pages: Vec<Result<(u32, String), String>> = pages
            .into_par_iter()
            .map(|(page_num, _)| {
                let text = doc.extract_text(&[page_num]).map_err(|e| {
                    format!("Failed to extract text from page {}: {}", page_num, e)
                })?;
                Ok((page_num, text))
            })
            .collect();

        let mut page_texts = Vec::new();
        let mut errors = Vec::new();

        for page_result in extracted_pages {
            match page_result {
                Ok((page_num, text)) => page_texts.push((page_num, text)),
                Err(e) => errors.push(e),
            }
        }

        if page_texts.is_empty() && !errors.is_empty() {
            return Err(TextExtractionError::ExtractionFailed(errors.join("; ")));
        }

        page_texts.sort_by_key(|(page_num, _)| *page_num);

        let combined = page_texts
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok((normalize_text(&combined), page_count))
    }

    fn extract_metadata_from_doc(&self, doc: &Document) -> ExtractedMetadata {
        let mut metadata = ExtractedMetadata {
            extraction_method: EXTRACTION_METHOD.to_string(),
            ..Default::default()
        };

        if let Ok(info) = doc.trailer.get(b"Info") {
            if let Ok(info_dict) = info.as_dict() {
                if let Ok(title) = info_dict.get(b"Title") {
                    if let Ok(title_str) = title.as_str() {
                        if let Ok(title_utf8) = std::str::from_utf8(title_str) {
                            if !title_utf8.trim().is_empty() {
                                metadata.title = Some(title_utf8.trim().to_string());
                            }
                        }
                    }
                }

                if let Ok(author) = info_dict.get(b"Author") {
                    if let Ok(author_str) = author.as_str() {
                        if let Ok(author_utf8) = std::str::from_utf8(author_str) {
                            if !author_utf8.trim().is_empty() {
                                metadata.author = Some(author_utf8.trim().to_string());
                            }
                        }
                    }
                }
            }
        }

        metadata
    }
}

/// Collapses repeated spaces and runs of blank lines so page breaks and PDF
/// layout artifacts do not dominate the text handed to the summarizer.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0;

    for line in raw.lines() {
        let mut collapsed = String::with_capacity(line.len());
        let mut last_was_space = false;
        for ch in line.trim_end().chars() {
            if ch == ' ' || ch == '\t' {
                if !last_was_space {
                    collapsed.push(' ');
                }
                last_was_space = true;
            } else {
                collapsed.push(ch);
                last_was_space = false;
            }
        }

        if collapsed.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            out.push('\n');
        } else {
            blank_run = 0;
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&collapsed);
        }
    }

    out.trim().to_string()
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Windows `text` into overlapping chunks of at most `chunk_size` bytes,
/// preferring to break at paragraph, line, sentence, then word boundaries.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < text.len() {
        let hard_end = floor_char_boundary(text, (start + chunk_size).min(text.len()));
        let mut end = hard_end;

        if hard_end < text.len() {
            for sep in SEPARATORS {
                if let Some(pos) = text[start..hard_end].rfind(sep) {
                    // Only break past the midpoint; a separator right at the
                    // front would produce degenerate slivers.
                    if pos > chunk_size / 2 {
                        end = start + pos + sep.len();
                        break;
                    }
                }
            }
        }

        let chunk = text[start..end].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        if end >= text.len() {
            break;
        }

        let next = floor_char_boundary(text, end.saturating_sub(overlap));
        start = if next > start { next } else { end };
    }

    chunks
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(
        &self,
        file_url: &str,
        _file_name: &str,
    ) -> Result<ExtractedDocument, TextExtractionError> {
        let bytes = self.fetch_bytes(file_url).await?;
        let file_size = bytes.len();

        let doc = Document::load_mem(&bytes)
            .map_err(|e| TextExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(TextExtractionError::ExtractionFailed(
                "PDF is password protected".to_string(),
            ));
        }

        let (text, page_count) = self.extract_pdf_text(&doc)?;

        let mut metadata = self.extract_metadata_from_doc(&doc);
        metadata.file_size = file_size;

        let chunks = chunk_text(&text, CHUNK_SIZE, CHUNK_OVERLAP);
        let word_count = text.split_whitespace().count() as i32;

        Ok(ExtractedDocument {
            text,
            page_count,
            word_count,
            chunks,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_spaces_and_blank_lines() {
        let raw = "Heading\n\n\n\nBody  text   here\t\twith tabs\n\n\nMore";
        let cleaned = normalize_text(raw);
        assert_eq!(cleaned, "Heading\n\nBody text here with tabs\n\nMore");
    }

    #[test]
    fn test_chunk_short_text_is_single_chunk() {
        let chunks = chunk_text("A short paragraph.", 1000, 200);
        assert_eq!(chunks, vec!["A short paragraph.".to_string()]);
    }

    #[test]
    fn test_chunks_respect_size_and_overlap() {
        let sentence = "The committee reviewed the budget proposal in detail. ";
        let text = sentence.repeat(60);
        let chunks = chunk_text(&text, 1000, 200);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 1000);
        }
        // Consecutive chunks share text from the overlap window.
        let tail: String = chunks[0].chars().rev().take(50).collect::<String>();
        let tail: String = tail.chars().rev().collect();
        assert!(chunks[1].contains(tail.trim()));
    }

    #[test]
    fn test_chunk_prefers_paragraph_breaks() {
        let para = "x".repeat(700);
        let text = format!("{para}\n\n{para}");
        let chunks = chunk_text(&text, 1000, 200);
        assert_eq!(chunks[0], para);
    }

    #[test]
    fn test_chunk_handles_multibyte_text() {
        let text = "Résumé naïve café déjà-vu. ".repeat(100);
        let chunks = chunk_text(&text, 1000, 200);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.is_char_boundary(chunk.len()));
        }
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk_text("", 1000, 200).is_empty());
        assert!(chunk_text("   \n\n  ", 1000, 200).is_empty());
    }
}
