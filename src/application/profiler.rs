use crate::config::WorkflowConfig;
use crate::domain::media::MediaDescriptor;
use crate::domain::profile::select_profile;
use crate::domain::workflow::WorkflowState;
use crate::error::{Operation, PipelineError, Result};
use crate::ports::repository::WorkflowRepository;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilerRequest {
    pub guid: String,
    /// Template that replaces the per-tier choice.
    #[serde(default)]
    pub job_template: Option<String>,
}

pub struct ProfilerService<R> {
    repo: R,
    config: WorkflowConfig,
}

impl<R> ProfilerService<R>
where
    R: WorkflowRepository,
{
    pub fn new(repo: R, config: WorkflowConfig) -> Self {
        Self { repo, config }
    }

    /// Load the workflow record and choose its encoding profile.
    pub async fn handle(&self, request: &ProfilerRequest) -> Result<WorkflowState> {
        info!(guid = %request.guid, "profiling source video");

        let mut state = self
            .repo
            .get_workflow(&request.guid)
            .await
            .map_err(|e| PipelineError::external(Operation::GetWorkflow, e))?
            .ok_or_else(|| PipelineError::WorkflowNotFound(request.guid.clone()))?;
        self.config.apply_defaults(&mut state);

        if state.src_mediainfo.trim().is_empty() {
            return Err(PipelineError::MissingMediaInfo(request.guid.clone()));
        }
        let descriptor = MediaDescriptor::parse(&state.src_mediainfo)?;

        let explicit_template = request
            .job_template
            .as_deref()
            .filter(|name| !name.is_empty());
        let choice = select_profile(&descriptor, explicit_template, state.frame_capture)?;
        state.apply_profile(&choice);

        info!(
            height = choice.source_height,
            profile = choice.tier.height(),
            template = %state.job_template,
            custom = state.is_custom_template,
            "encoding profile selected"
        );
        Ok(state)
    }
}
