use serde::{Deserialize, Serialize};

/// Phase of the processing pipeline a log row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PipelineStage {
    Extraction,
    Analysis,
    SummaryGeneration,
    Error,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Extraction => "extraction",
            PipelineStage::Analysis => "analysis",
            PipelineStage::SummaryGeneration => "summary_generation",
            PipelineStage::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "extraction" => Ok(PipelineStage::Extraction),
            "analysis" => Ok(PipelineStage::Analysis),
            "summary_generation" => Ok(PipelineStage::SummaryGeneration),
            "error" => Ok(PipelineStage::Error),
            _ => Err(format!("Invalid pipeline stage: {}", s)),
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome recorded for one pipeline stage transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LogStatus {
    Started,
    Completed,
    Error,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Started => "started",
            LogStatus::Completed => "completed",
            LogStatus::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "started" => Ok(LogStatus::Started),
            "completed" => Ok(LogStatus::Completed),
            "error" => Ok(LogStatus::Error),
            _ => Err(format!("Invalid log status: {}", s)),
        }
    }
}

impl std::fmt::Display for LogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_round_trip() {
        for stage in [
            PipelineStage::Extraction,
            PipelineStage::Analysis,
            PipelineStage::SummaryGeneration,
            PipelineStage::Error,
        ] {
            assert_eq!(PipelineStage::from_str(stage.as_str()).unwrap(), stage);
        }
        assert!(PipelineStage::from_str("chunking").is_err());
    }

    #[test]
    fn test_log_status_round_trip() {
        for status in [LogStatus::Started, LogStatus::Completed, LogStatus::Error] {
            assert_eq!(LogStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(LogStatus::from_str("pending").is_err());
    }
}
