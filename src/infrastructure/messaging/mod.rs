pub mod background_processor;
pub mod job_queue;

pub use background_processor::BackgroundProcessor;
pub use job_queue::{BoundedJobQueue, JobQueueReceiver};
