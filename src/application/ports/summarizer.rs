use async_trait::async_trait;

#[derive(Debug)]
pub enum SummarizerError {
    /// Provider unreachable or returned a transport/HTTP error. Fails the
    /// pipeline; distinct from unparseable output, which is absorbed into a
    /// minimal fallback summary by the adapter.
    Unavailable(String),
}

impl std::fmt::Display for SummarizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummarizerError::Unavailable(msg) => write!(f, "Summarizer unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SummarizerError {}

#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub max_length: usize,
    pub include_action_items: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_length: 1000,
            include_action_items: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedSummary {
    pub title: String,
    pub content: String,
    pub key_points: Vec<String>,
    pub action_items: Vec<String>,
    pub tags: Vec<String>,
    pub word_count: i32,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        file_name: &str,
        options: SummaryOptions,
    ) -> Result<GeneratedSummary, SummarizerError>;

    /// Identifier persisted as the summary's `ai_model`.
    fn model_id(&self) -> &str;
}
