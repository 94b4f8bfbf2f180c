//! Configuration for the workflow stages.

use crate::domain::job::AccelerationMode;
use crate::domain::profile::TierTemplates;
use crate::domain::workflow::WorkflowState;
use crate::error::{PipelineError, Result};
use std::env;

/// Workflow-wide settings, loaded once per process.
///
/// Values stored on a workflow record take precedence; these only fill the gaps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkflowConfig {
    /// Name stamped into job user metadata
    pub workflow_name: String,
    /// Bucket holding source videos
    pub source_bucket: String,
    /// Bucket receiving transcoded outputs
    pub destination_bucket: String,
    /// CDN host serving the destination bucket
    pub cloudfront_domain: String,
    /// Add a thumbnail capture group to every job
    pub frame_capture: bool,
    /// Job template per resolution tier
    pub templates: TierTemplates,
    /// Rotation applied to the job input
    pub input_rotate: String,
    pub acceleration: AccelerationMode,
    /// IAM role the transcoding service assumes
    pub mediaconvert_role: String,
    /// DynamoDB table holding workflow records
    pub dynamodb_table: String,
    /// Account-specific transcoding endpoint, if one must be used
    pub mediaconvert_endpoint: Option<String>,
}

impl WorkflowConfig {
    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).unwrap_or_default();

        let dynamodb_table = var("DYNAMODB_TABLE");
        if dynamodb_table.is_empty() {
            return Err(PipelineError::Config("DYNAMODB_TABLE"));
        }

        Ok(Self {
            workflow_name: var("WORKFLOW_NAME"),
            source_bucket: var("SOURCE_BUCKET"),
            destination_bucket: var("DESTINATION_BUCKET"),
            cloudfront_domain: var("CLOUDFRONT_DOMAIN"),
            frame_capture: var("FRAME_CAPTURE").trim().eq_ignore_ascii_case("true"),
            templates: TierTemplates {
                p2160: var("JOB_TEMPLATE_2160P"),
                p1080: var("JOB_TEMPLATE_1080P"),
                p720: var("JOB_TEMPLATE_720P"),
            },
            input_rotate: match var("INPUT_ROTATE") {
                rotate if rotate.is_empty() => "DEGREE_0".to_string(),
                rotate => rotate,
            },
            acceleration: AccelerationMode::parse(lookup("ACCELERATED_TRANSCODING").as_deref()),
            mediaconvert_role: var("MEDIACONVERT_ROLE"),
            dynamodb_table,
            mediaconvert_endpoint: lookup("MEDIACONVERT_ENDPOINT").filter(|e| !e.is_empty()),
        })
    }

    /// Role for job submission; only the encode stage needs it.
    pub fn mediaconvert_role(&self) -> Result<&str> {
        if self.mediaconvert_role.is_empty() {
            return Err(PipelineError::Config("MEDIACONVERT_ROLE"));
        }
        Ok(&self.mediaconvert_role)
    }

    /// Fill fields the workflow record left empty.
    pub fn apply_defaults(&self, state: &mut WorkflowState) {
        fn fill(field: &mut String, default: &str) {
            if field.is_empty() {
                *field = default.to_string();
            }
        }

        fill(&mut state.workflow_name, &self.workflow_name);
        fill(&mut state.src_bucket, &self.source_bucket);
        fill(&mut state.dest_bucket, &self.destination_bucket);
        fill(&mut state.cloud_front, &self.cloudfront_domain);
        fill(&mut state.job_template_2160p, &self.templates.p2160);
        fill(&mut state.job_template_1080p, &self.templates.p1080);
        fill(&mut state.job_template_720p, &self.templates.p720);
        fill(&mut state.input_rotate, &self.input_rotate);
        fill(&mut state.accelerated_transcoding, self.acceleration.as_str());
        state.frame_capture |= self.frame_capture;
    }
}
