use serde::{Deserialize, Serialize};

/// Lifecycle state of an uploaded document. Transitions only move forward;
/// there is no automatic recovery from `Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Uploaded,
    Processing,
    Completed,
    Error,
}

impl DocumentStatus {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, DocumentStatus::Uploaded)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, DocumentStatus::Processing)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DocumentStatus::Completed)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DocumentStatus::Error)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Completed | DocumentStatus::Error)
    }

    pub fn can_transition_to(&self, new_status: &DocumentStatus) -> bool {
        matches!(
            (self, new_status),
            (DocumentStatus::Uploaded, DocumentStatus::Processing)
                | (DocumentStatus::Processing, DocumentStatus::Completed)
                | (DocumentStatus::Processing, DocumentStatus::Error)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Uploaded => "uploaded",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "uploaded" => Ok(DocumentStatus::Uploaded),
            "processing" => Ok(DocumentStatus::Processing),
            "completed" => Ok(DocumentStatus::Completed),
            "error" => Ok(DocumentStatus::Error),
            _ => Err(format!("Invalid document status: {}", s)),
        }
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Uploaded
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
