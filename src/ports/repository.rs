use crate::domain::workflow::WorkflowState;
use async_trait::async_trait;
use std::error::Error;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// Get the workflow record for a job GUID
    async fn get_workflow(
        &self,
        guid: &str,
    ) -> Result<Option<WorkflowState>, Box<dyn Error + Send + Sync>>;

    /// Persist completion status, the raw report and resolved outputs
    async fn save_outputs(
        &self,
        state: &WorkflowState,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
