pub mod document_status;
pub mod pipeline_stage;

pub use document_status::DocumentStatus;
pub use pipeline_stage::{LogStatus, PipelineStage};
