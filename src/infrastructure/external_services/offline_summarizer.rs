use async_trait::async_trait;
use regex::Regex;

use crate::application::ports::summarizer::{
    GeneratedSummary, Summarizer, SummarizerError, SummaryOptions,
};

pub const OFFLINE_MODEL_ID: &str = "offline-mock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Financial,
    Technical,
    Legal,
    Business,
    Research,
    Travel,
    Report,
    Generic,
}

impl DocumentKind {
    fn label(&self) -> &'static str {
        match self {
            DocumentKind::Financial => "Financial Report",
            DocumentKind::Technical => "Technical Document",
            DocumentKind::Legal => "Legal Document",
            DocumentKind::Business => "Business Document",
            DocumentKind::Research => "Research Document",
            DocumentKind::Travel => "Travel Document",
            DocumentKind::Report => "Report",
            DocumentKind::Generic => "Document",
        }
    }

    fn tags(&self) -> Vec<String> {
        let tags: &[&str] = match self {
            DocumentKind::Financial => &["financial", "revenue", "budget"],
            DocumentKind::Technical => &["technical", "system", "development"],
            DocumentKind::Legal => &["legal", "contract", "compliance"],
            DocumentKind::Business => &["business", "strategy", "analysis"],
            DocumentKind::Research => &["research", "study", "analysis"],
            DocumentKind::Travel => &["travel", "booking", "confirmation"],
            DocumentKind::Report => &["report", "summary", "findings"],
            DocumentKind::Generic => &["document", "analysis"],
        };
        tags.iter().map(|t| t.to_string()).collect()
    }
}

/// Deterministic summarizer used when no API key is configured. Classifies
/// the document from keyword patterns and fills in templated output, so the
/// full pipeline stays exercisable without network access.
pub struct OfflineSummarizer {
    detectors: Vec<(DocumentKind, Regex)>,
}

impl OfflineSummarizer {
    pub fn new() -> Self {
        // Ordered; the first matching pattern wins.
        let patterns: [(DocumentKind, &str); 7] = [
            (
                DocumentKind::Financial,
                r"(?i)financial|revenue|profit|budget|cost|investment|money|dollar|\$|income|expense|quarterly|annual",
            ),
            (
                DocumentKind::Technical,
                r"(?i)technical|system|software|api|implementation|architecture|code|development|technology",
            ),
            (
                DocumentKind::Legal,
                r"(?i)contract|agreement|legal|terms|clause|liability|compliance|regulation",
            ),
            (
                DocumentKind::Business,
                r"(?i)business|strategy|market|customer|sales|growth|plan|analysis|management",
            ),
            (
                DocumentKind::Research,
                r"(?i)research|study|analysis|methodology|findings|conclusion|abstract|hypothesis",
            ),
            (
                DocumentKind::Travel,
                r"(?i)booking|confirmation|travel|flight|hotel|reservation|itinerary",
            ),
            (
                DocumentKind::Report,
                r"(?i)report|summary|overview|findings|results",
            ),
        ];

        let detectors = patterns
            .into_iter()
            .map(|(kind, pattern)| {
                let regex = Regex::new(pattern).expect("detector patterns are static");
                (kind, regex)
            })
            .collect();

        Self { detectors }
    }

    fn classify(&self, text: &str, file_name: &str) -> DocumentKind {
        for (kind, regex) in &self.detectors {
            if regex.is_match(text) {
                return *kind;
            }
        }
        if file_name.to_lowercase().contains("report") {
            return DocumentKind::Report;
        }
        DocumentKind::Generic
    }

    fn key_points(kind: DocumentKind) -> Vec<String> {
        let points: &[&str] = match kind {
            DocumentKind::Financial => &[
                "Financial performance metrics and key indicators analyzed",
                "Revenue and cost analysis with trend identification",
                "Budget allocation and investment recommendations",
                "Operational efficiency opportunities identified",
            ],
            DocumentKind::Technical => &[
                "Technical specifications and system requirements outlined",
                "Implementation guidelines and best practices detailed",
                "Architecture and design considerations explained",
                "Performance optimization opportunities identified",
            ],
            DocumentKind::Business => &[
                "Business strategy and market analysis presented",
                "Customer insights and market opportunities identified",
                "Growth strategies and expansion plans outlined",
                "Operational improvements and efficiency gains highlighted",
            ],
            DocumentKind::Travel => &[
                "Travel arrangements and booking details confirmed",
                "Accommodation and transportation information provided",
                "Itinerary and schedule details outlined",
                "Payment and confirmation details included",
            ],
            _ => &[
                "Key themes and considerations identified",
                "Data-driven findings based on content examination",
                "Strategic recommendations for implementation",
                "Performance improvement opportunities highlighted",
            ],
        };
        points.iter().map(|p| p.to_string()).collect()
    }

    fn action_items(kind: DocumentKind) -> Vec<String> {
        let items: &[&str] = match kind {
            DocumentKind::Financial => &[
                "Review financial performance against established benchmarks",
                "Implement cost optimization strategies identified in analysis",
                "Monitor key financial indicators on a regular basis",
            ],
            DocumentKind::Technical => &[
                "Review technical specifications and requirements",
                "Plan implementation timeline based on outlined guidelines",
                "Establish testing and quality assurance procedures",
            ],
            DocumentKind::Travel => &[
                "Confirm all booking details and reservations",
                "Review travel itinerary and timing requirements",
                "Prepare necessary documentation and identification",
            ],
            _ => &[
                "Review and analyze the key findings and recommendations",
                "Develop implementation timeline based on priority assessment",
                "Establish monitoring systems for progress tracking",
            ],
        };
        items.iter().map(|i| i.to_string()).collect()
    }
}

impl Default for OfflineSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Summarizer for OfflineSummarizer {
    async fn summarize(
        &self,
        text: &str,
        file_name: &str,
        options: SummaryOptions,
    ) -> Result<GeneratedSummary, SummarizerError> {
        let kind = self.classify(text, file_name);
        let label = kind.label();
        let source_word_count = text.split_whitespace().count();

        let lead: String = text
            .split_terminator(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| s.len() > 20)
            .take(3)
            .collect::<Vec<_>>()
            .join(". ");

        let content = if lead.len() > 50 {
            format!(
                "This {} summarizes the analyzed content. {}.\n\nThe document contains {} words \
                 and covers several key areas of interest, with findings and recommendations \
                 relevant to decision making.",
                label.to_lowercase(),
                lead,
                source_word_count
            )
        } else {
            format!(
                "This {} contains {} words of content. The analysis highlights findings that \
                 can inform decision making and future planning.",
                label.to_lowercase(),
                source_word_count
            )
        };

        let action_items = if options.include_action_items {
            Self::action_items(kind)
        } else {
            Vec::new()
        };

        let word_count = content.split_whitespace().count() as i32;

        Ok(GeneratedSummary {
            title: format!("{} Analysis", label),
            content,
            key_points: Self::key_points(kind),
            action_items,
            tags: kind.tags(),
            word_count,
        })
    }

    fn model_id(&self) -> &str {
        OFFLINE_MODEL_ID
    }
}
