use crate::domain::job::{JobSpecification, JobTemplate};
use async_trait::async_trait;
use std::error::Error;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscodingService: Send + Sync {
    /// Fetch a named job template
    async fn get_job_template(
        &self,
        name: &str,
    ) -> Result<JobTemplate, Box<dyn Error + Send + Sync>>;

    /// Submit a job, returning its id
    async fn create_job(
        &self,
        job: &JobSpecification,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}
