use crate::config::WorkflowConfig;
use crate::domain::outputs::{latest_thumbnail, resolve_groups, CompletionReport};
use crate::domain::workflow::WorkflowState;
use crate::error::{Operation, PipelineError, Result};
use crate::ports::repository::WorkflowRepository;
use crate::ports::storage::StoragePort;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

/// Job state-change notification; only the `detail` payload is used.
#[derive(Debug, Deserialize)]
struct CompletionEvent {
    detail: CompletionReport,
}

pub struct OutputValidateService<S, R> {
    storage: S,
    repo: R,
    config: WorkflowConfig,
}

impl<S, R> OutputValidateService<S, R>
where
    S: StoragePort,
    R: WorkflowRepository,
{
    pub fn new(storage: S, repo: R, config: WorkflowConfig) -> Self {
        Self {
            storage,
            repo,
            config,
        }
    }

    pub async fn handle_event(&self, event: serde_json::Value) -> Result<WorkflowState> {
        let event: CompletionEvent =
            serde_json::from_value(event).map_err(PipelineError::InvalidEvent)?;
        self.handle(event.detail).await
    }

    /// Resolve a finished job's outputs and record them on its workflow.
    pub async fn handle(&self, report: CompletionReport) -> Result<WorkflowState> {
        let guid = report.user_metadata.guid.clone();
        info!(guid = %guid, job_id = %report.job_id, status = %report.status, "validating outputs");

        let mut state = self
            .repo
            .get_workflow(&guid)
            .await
            .map_err(|e| PipelineError::external(Operation::GetWorkflow, e))?
            .ok_or_else(|| PipelineError::WorkflowNotFound(guid.clone()))?;
        self.config.apply_defaults(&mut state);

        let context = state.resolution_context();
        let mut outputs = resolve_groups(&report, &context)?;

        if context.frame_capture {
            let prefix = context.thumbnail_prefix();
            let keys = self
                .storage
                .list_keys(&context.destination_bucket, &prefix)
                .await
                .map_err(|e| PipelineError::external(Operation::ListObjects, e))?;
            let (thumbnail, thumbnail_url) = latest_thumbnail(&keys, &context)?;
            outputs.thumbnails = vec![thumbnail];
            outputs.thumbnail_urls = vec![thumbnail_url];
        }

        state.complete(report, outputs, Utc::now());
        self.repo
            .save_outputs(&state)
            .await
            .map_err(|e| PipelineError::external(Operation::SaveOutputs, e))?;

        info!(guid = %guid, "workflow complete");
        Ok(state)
    }
}
