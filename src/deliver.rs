pub mod publish_job;
pub mod render_message;

pub use publish_job::{PublishJob, PublishJobError};
