use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::summarizer::{
    GeneratedSummary, Summarizer, SummarizerError, SummaryOptions,
};

pub const DEFAULT_API_URL: &str = "https://api.aimlapi.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemma-3n-e4b-it";

/// Upper bound on document text sent in one prompt; longer documents are
/// truncated rather than split across calls.
const MAX_PROMPT_CHARS: usize = 12_000;

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Shape the model is instructed to reply with.
#[derive(Deserialize)]
struct ModelSummary {
    title: Option<String>,
    content: Option<String>,
    #[serde(rename = "keyPoints", default)]
    key_points: Vec<String>,
    #[serde(rename = "actionItems", default)]
    action_items: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
}

pub struct ChatSummarizer {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl ChatSummarizer {
    pub fn new(client: Client, api_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
            model,
        }
    }

    fn build_prompt(text: &str, file_name: &str, options: &SummaryOptions) -> String {
        let truncated = truncate_chars(text, MAX_PROMPT_CHARS);
        let action_items_line = if options.include_action_items {
            "\"actionItems\": [concrete follow-ups, empty array if none], "
        } else {
            "\"actionItems\": [], "
        };

        format!(
            "Summarize the document \"{file_name}\" below. Reply with ONLY a JSON object, \
             no markdown, with these fields: \
             {{\"title\": short descriptive title, \
             \"content\": summary of at most {max_length} words, \
             \"keyPoints\": [3-7 bullet strings], \
             {action_items_line}\
             \"tags\": [2-5 topical tags]}}.\n\nDocument:\n{truncated}",
            max_length = options.max_length,
        )
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Parses the model's reply into a summary. Unparseable output degrades to a
/// minimal summary built from the document itself instead of failing the
/// pipeline; only transport-level errors do that.
pub fn parse_generated(reply: &str, file_name: &str, source_text: &str) -> GeneratedSummary {
    let cleaned = strip_code_fence(reply.trim());

    if let Ok(parsed) = serde_json::from_str::<ModelSummary>(cleaned) {
        let content = parsed
            .content
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| truncate_chars(source_text.trim(), 1000).to_string());
        let word_count = content.split_whitespace().count() as i32;

        return GeneratedSummary {
            title: parsed
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| file_name.to_string()),
            content,
            key_points: parsed.key_points,
            action_items: parsed.action_items,
            tags: parsed.tags,
            word_count,
        };
    }

    // Keep whatever prose the model produced; fall back to the document
    // itself only when the reply was empty.
    let content = if cleaned.is_empty() {
        truncate_chars(source_text.trim(), 1000).to_string()
    } else {
        truncate_chars(cleaned, 1000).to_string()
    };
    let word_count = content.split_whitespace().count() as i32;

    GeneratedSummary {
        title: file_name.to_string(),
        content,
        key_points: Vec::new(),
        action_items: Vec::new(),
        tags: Vec::new(),
        word_count,
    }
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    async fn summarize(
        &self,
        text: &str,
        file_name: &str,
        options: SummaryOptions,
    ) -> Result<GeneratedSummary, SummarizerError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::build_prompt(text, file_name, &options),
            }],
            temperature: 0.3,
            max_tokens: 2048,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizerError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SummarizerError::Unavailable(format!(
                "chat completions returned HTTP {}",
                response.status()
            )));
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| SummarizerError::Unavailable(e.to_string()))?;

        let reply = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .unwrap_or_default();

        Ok(parse_generated(reply, file_name, text))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_reply() {
        let reply = r#"{"title":"Q3 Budget Review","content":"The report covers spending.","keyPoints":["Revenue up"],"actionItems":["Approve budget"],"tags":["finance"]}"#;
        let summary = parse_generated(reply, "budget.pdf", "source text");

        assert_eq!(summary.title, "Q3 Budget Review");
        assert_eq!(summary.content, "The report covers spending.");
        assert_eq!(summary.key_points, vec!["Revenue up"]);
        assert_eq!(summary.action_items, vec!["Approve budget"]);
        assert_eq!(summary.tags, vec!["finance"]);
        assert_eq!(summary.word_count, 4);
    }

    #[test]
    fn test_parse_strips_markdown_fence() {
        let reply = "```json\n{\"title\":\"Fenced\",\"content\":\"Body here.\"}\n```";
        let summary = parse_generated(reply, "doc.pdf", "source");
        assert_eq!(summary.title, "Fenced");
        assert_eq!(summary.content, "Body here.");
    }

    #[test]
    fn test_unparseable_reply_falls_back_to_minimal_summary() {
        let reply = "Here is a plain-prose summary instead of JSON.";
        let summary = parse_generated(reply, "notes.pdf", "source text");

        assert_eq!(summary.title, "notes.pdf");
        assert_eq!(summary.content, reply);
        assert!(summary.key_points.is_empty());
        assert!(summary.action_items.is_empty());
        assert!(summary.tags.is_empty());
    }

    #[test]
    fn test_empty_reply_falls_back_to_document_text() {
        let source = "The underlying document text used when the model says nothing.";
        let summary = parse_generated("", "notes.pdf", source);
        assert_eq!(summary.content, source);
    }

    #[test]
    fn test_fallback_content_is_truncated() {
        let reply = "word ".repeat(2000);
        let summary = parse_generated(&reply, "big.pdf", "src");
        assert!(summary.content.chars().count() <= 1000);
    }

    #[test]
    fn test_missing_fields_are_defaulted() {
        let reply = r#"{"title":"Only Title"}"#;
        let source = "Document body text for defaulted content.";
        let summary = parse_generated(reply, "doc.pdf", source);

        assert_eq!(summary.title, "Only Title");
        assert_eq!(summary.content, source);
        assert!(summary.key_points.is_empty());
    }
}
