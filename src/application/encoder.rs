use crate::config::WorkflowConfig;
use crate::domain::job::build_job_specification;
use crate::domain::workflow::WorkflowState;
use crate::error::{Operation, PipelineError, Result};
use crate::ports::transcoder::TranscodingService;
use tracing::{debug, info};

pub struct EncodeService<T> {
    transcoder: T,
    config: WorkflowConfig,
}

impl<T> EncodeService<T>
where
    T: TranscodingService,
{
    pub fn new(transcoder: T, config: WorkflowConfig) -> Self {
        Self { transcoder, config }
    }

    /// Build the job for a profiled workflow and submit it.
    pub async fn handle(&self, mut state: WorkflowState) -> Result<WorkflowState> {
        self.config.apply_defaults(&mut state);
        let role = self.config.mediaconvert_role()?;
        let context = state.job_context(role);

        info!(guid = %context.guid, template = %context.template_name, "fetching job template");
        let template = self
            .transcoder
            .get_job_template(&context.template_name)
            .await
            .map_err(|e| PipelineError::external(Operation::GetJobTemplate, e))?;

        let job = build_job_specification(&template, &context)?;
        debug!(job = ?job, "job specification");

        let job_id = self
            .transcoder
            .create_job(&job)
            .await
            .map_err(|e| PipelineError::external(Operation::CreateJob, e))?;
        info!(guid = %context.guid, job_id = %job_id, "encode job submitted");

        state.encode_job_id = Some(job_id);
        state.encoding_job = Some(job);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::spec::AccelerationMode;
    use crate::domain::job::{GroupKind, JobSpecification, JobTemplate, TimecodeSource};
    use crate::domain::profile::ResolutionTier;
    use crate::error::ErrorKind;
    use crate::ports::transcoder::MockTranscodingService;
    use serde_json::json;

    fn config() -> WorkflowConfig {
        WorkflowConfig {
            mediaconvert_role: "arn:aws:iam::123:role/mediaconvert".into(),
            dynamodb_table: "table".into(),
            ..Default::default()
        }
    }

    fn profiled(frame_capture: bool, acceleration: &str) -> WorkflowState {
        WorkflowState {
            guid: "12345".into(),
            workflow_name: "vod".into(),
            src_bucket: "src".into(),
            src_video: "video.mp4".into(),
            dest_bucket: "dest".into(),
            input_rotate: "DEGREE_0".into(),
            accelerated_transcoding: acceleration.into(),
            frame_capture,
            encoding_profile: Some(ResolutionTier::P1080),
            frame_capture_width: frame_capture.then_some(1920),
            frame_capture_height: frame_capture.then_some(1080),
            job_template: "vod_1080p".into(),
            ..Default::default()
        }
    }

    fn hls_template() -> JobTemplate {
        serde_json::from_value(json!({
            "name": "vod_1080p",
            "outputGroups": [{
                "name": "Apple HLS",
                "outputGroupSettings": {
                    "type": "HLS_GROUP_SETTINGS",
                    "hlsGroupSettings": { "segmentLength": 6, "destination": null }
                },
                "outputs": [{ "preset": "hls_1080p", "nameModifier": "_1080p" }]
            }]
        }))
        .unwrap()
    }

    fn transcoder_with(template: JobTemplate) -> MockTranscodingService {
        let mut transcoder = MockTranscodingService::new();
        transcoder
            .expect_get_job_template()
            .withf(|name| name == "vod_1080p")
            .times(1)
            .returning(move |_| Ok(template.clone()));
        transcoder
    }

    #[tokio::test]
    async fn test_submits_merged_job() {
        let mut transcoder = transcoder_with(hls_template());
        transcoder
            .expect_create_job()
            .withf(|job: &JobSpecification| {
                let group = &job.settings.output_groups[0];
                job.job_template == "vod_1080p"
                    && job.role == "arn:aws:iam::123:role/mediaconvert"
                    && group.setting("segmentLength") == Some(&json!(6))
                    && group.setting("destination") == Some(&json!("s3://dest/12345/hls/"))
            })
            .times(1)
            .returning(|_| Ok("1234567890-abcdef".to_string()));

        let service = EncodeService::new(transcoder, config());
        let state = service.handle(profiled(false, "DISABLED")).await.unwrap();

        assert_eq!(state.encode_job_id.as_deref(), Some("1234567890-abcdef"));
        let job = state.encoding_job.unwrap();
        assert_eq!(job.settings.output_groups.len(), 1);
        assert_eq!(job.settings.output_groups[0].outputs.len(), 1);
        assert_eq!(job.settings.inputs[0].file_input, "s3://src/video.mp4");
        assert_eq!(job.acceleration_settings, None);
    }

    #[tokio::test]
    async fn test_submits_with_debug_logging() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut transcoder = transcoder_with(hls_template());
        transcoder
            .expect_create_job()
            .times(1)
            .returning(|_| Ok("job".to_string()));

        let service = EncodeService::new(transcoder, config());
        let state = service.handle(profiled(true, "ENABLED")).await.unwrap();
        assert_eq!(state.encode_job_id.as_deref(), Some("job"));
    }

    #[tokio::test]
    async fn test_frame_capture_and_acceleration() {
        let mut transcoder = transcoder_with(hls_template());
        transcoder
            .expect_create_job()
            .returning(|_| Ok("job".to_string()));

        let service = EncodeService::new(transcoder, config());
        let state = service.handle(profiled(true, "PREFERRED")).await.unwrap();
        let job = state.encoding_job.unwrap();

        let capture = job.settings.output_groups.last().unwrap();
        assert_eq!(capture.kind(), Some(GroupKind::File));
        assert_eq!(capture.custom_name.as_deref(), Some("Frame Capture"));
        assert_eq!(
            capture.outputs[0]["videoDescription"]["width"],
            json!(1920)
        );
        assert_eq!(
            job.acceleration_settings.map(|a| a.mode),
            Some(AccelerationMode::Preferred)
        );
        assert_eq!(job.settings.timecode_config.source, TimecodeSource::Zerobased);
    }

    #[tokio::test]
    async fn test_template_fetch_failure() {
        let mut transcoder = MockTranscodingService::new();
        transcoder
            .expect_get_job_template()
            .returning(|_| Err("NotFoundException".into()));
        transcoder.expect_create_job().never();

        let service = EncodeService::new(transcoder, config());
        let err = service.handle(profiled(false, "")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExternalService);
        assert_eq!(err.operation(), Some(Operation::GetJobTemplate));
    }

    #[tokio::test]
    async fn test_submission_failure() {
        let mut transcoder = transcoder_with(hls_template());
        transcoder
            .expect_create_job()
            .returning(|_| Err("TooManyRequestsException".into()));

        let service = EncodeService::new(transcoder, config());
        let err = service.handle(profiled(false, "")).await.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::CreateJob));
    }

    #[tokio::test]
    async fn test_missing_role() {
        let transcoder = MockTranscodingService::new();
        let config = WorkflowConfig {
            mediaconvert_role: String::new(),
            ..config()
        };
        let service = EncodeService::new(transcoder, config);
        let err = service.handle(profiled(false, "")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Config("MEDIACONVERT_ROLE")));
    }
}
