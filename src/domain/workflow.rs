//! Per-video workflow record, keyed by GUID and carried from stage to stage.

use crate::domain::job::spec::{AccelerationMode, JobContext, JobSpecification};
use crate::domain::outputs::{CompletionReport, ResolutionContext, ResolvedOutputs};
use crate::domain::profile::{FrameCaptureGeometry, ProfileChoice, ResolutionTier, TierTemplates};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowState {
    pub guid: String,
    pub start_time: String,
    pub workflow_trigger: String,
    pub workflow_status: String,
    pub workflow_name: String,
    pub src_bucket: String,
    pub dest_bucket: String,
    pub cloud_front: String,
    pub frame_capture: bool,
    pub archive_source: String,
    #[serde(rename = "jobTemplate_2160p")]
    pub job_template_2160p: String,
    #[serde(rename = "jobTemplate_1080p")]
    pub job_template_1080p: String,
    #[serde(rename = "jobTemplate_720p")]
    pub job_template_720p: String,
    pub input_rotate: String,
    pub accelerated_transcoding: String,
    pub enable_sns: bool,
    pub enable_sqs: bool,
    pub src_video: String,
    pub enable_media_package: bool,
    pub src_mediainfo: String,

    // Set by the profiler.
    pub src_height: u32,
    pub src_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_profile: Option<ResolutionTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_capture_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_capture_width: Option<u32>,
    pub job_template: String,
    pub is_custom_template: bool,

    // Set by the encoder.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub encoding_job: Option<JobSpecification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode_job_id: Option<String>,

    // Set once outputs are validated.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub encoding_output: Option<CompletionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub outputs: ResolvedOutputs,
}

/// Stored documents written by other producers may not match our types; those read as
/// absent instead of failing the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

impl WorkflowState {
    pub fn tier_templates(&self) -> TierTemplates {
        TierTemplates {
            p2160: self.job_template_2160p.clone(),
            p1080: self.job_template_1080p.clone(),
            p720: self.job_template_720p.clone(),
        }
    }

    pub fn apply_profile(&mut self, choice: &ProfileChoice) {
        self.src_width = choice.source_width;
        self.src_height = choice.source_height;
        self.encoding_profile = Some(choice.tier);
        self.frame_capture_width = choice.frame_capture.map(|geometry| geometry.width);
        self.frame_capture_height = choice.frame_capture.map(|geometry| geometry.height);
        self.job_template = choice.template_name(&self.tier_templates()).to_string();
        self.is_custom_template = choice.is_custom_template();
    }

    /// Frame capture size, present only when capture is on and the profiler ran.
    pub fn frame_capture_geometry(&self) -> Option<FrameCaptureGeometry> {
        if !self.frame_capture {
            return None;
        }
        match (self.frame_capture_width, self.frame_capture_height) {
            (Some(width), Some(height)) => Some(FrameCaptureGeometry { width, height }),
            _ => self.encoding_profile.map(FrameCaptureGeometry::from),
        }
    }

    pub fn job_context(&self, role: &str) -> JobContext {
        JobContext {
            guid: self.guid.clone(),
            workflow_name: self.workflow_name.clone(),
            role: role.to_string(),
            template_name: self.job_template.clone(),
            source_bucket: self.src_bucket.clone(),
            source_video: self.src_video.clone(),
            destination_bucket: self.dest_bucket.clone(),
            input_rotate: self.input_rotate.clone(),
            frame_capture: self.frame_capture_geometry(),
            acceleration: AccelerationMode::parse(Some(&self.accelerated_transcoding)),
        }
    }

    pub fn resolution_context(&self) -> ResolutionContext {
        ResolutionContext {
            guid: self.guid.clone(),
            cdn_host: self.cloud_front.clone(),
            frame_capture: self.frame_capture,
            destination_bucket: self.dest_bucket.clone(),
        }
    }

    pub fn complete(
        &mut self,
        report: CompletionReport,
        outputs: ResolvedOutputs,
        end_time: DateTime<Utc>,
    ) {
        self.encoding_output = Some(report);
        self.outputs = outputs;
        self.end_time = Some(end_time);
        self.workflow_status = "Complete".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state() -> WorkflowState {
        serde_json::from_value(json!({
            "guid": "12345",
            "workflowName": "vod",
            "srcBucket": "src",
            "destBucket": "dest",
            "cloudFront": "cdn.example.com",
            "frameCapture": true,
            "jobTemplate_2160p": "t_2160p",
            "jobTemplate_1080p": "t_1080p",
            "jobTemplate_720p": "t_720p",
            "inputRotate": "DEGREE_0",
            "acceleratedTranscoding": "PREFERRED",
            "srcVideo": "video.mp4"
        }))
        .unwrap()
    }

    #[test]
    fn test_apply_profile() {
        let mut state = state();
        state.apply_profile(&ProfileChoice {
            tier: ResolutionTier::P1080,
            source_width: 1920,
            source_height: 1080,
            frame_capture: Some(FrameCaptureGeometry {
                width: 1920,
                height: 1080,
            }),
            custom_template: None,
        });
        assert_eq!(state.job_template, "t_1080p");
        assert!(!state.is_custom_template);
        assert_eq!(state.frame_capture_width, Some(1920));

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["encodingProfile"], 1080);
        assert_eq!(value["frameCaptureHeight"], 1080);
        assert_eq!(value["jobTemplate"], "t_1080p");
    }

    #[test]
    fn test_job_context() {
        let mut state = state();
        state.job_template = "t_720p".into();
        state.encoding_profile = Some(ResolutionTier::P720);
        let context = state.job_context("Role");
        assert_eq!(context.template_name, "t_720p");
        assert_eq!(context.acceleration, AccelerationMode::Preferred);
        assert_eq!(
            context.frame_capture,
            Some(FrameCaptureGeometry {
                width: 1280,
                height: 720
            })
        );
    }

    #[test]
    fn test_frame_capture_off_means_no_geometry() {
        let mut state = state();
        state.frame_capture = false;
        state.frame_capture_width = Some(1280);
        state.frame_capture_height = Some(720);
        assert_eq!(state.frame_capture_geometry(), None);
    }

    #[test]
    fn test_foreign_job_document_still_loads() {
        let mut record = serde_json::to_value(state()).unwrap();
        record["encodingJob"] = json!({
            "Job": {
                "Id": "1234567890-abcdef",
                "Settings": { "OutputGroups": [{ "OutputGroupSettings": { "Type": "HLS_GROUP_SETTINGS" } }] }
            }
        });
        record["encodeJobId"] = json!("1234567890-abcdef");

        let loaded: WorkflowState = serde_json::from_value(record).unwrap();
        assert_eq!(loaded.guid, "12345");
        assert_eq!(loaded.encoding_job, None);
        assert_eq!(loaded.encode_job_id.as_deref(), Some("1234567890-abcdef"));
    }

    #[test]
    fn test_stored_job_document_round_trips() {
        let mut state = state();
        state.encoding_profile = Some(ResolutionTier::P1080);
        state.job_template = "t_1080p".into();
        let job = crate::domain::job::build_job_specification(
            &Default::default(),
            &state.job_context("Role"),
        )
        .unwrap();
        state.encoding_job = Some(job.clone());

        let loaded: WorkflowState =
            serde_json::from_value(serde_json::to_value(&state).unwrap()).unwrap();
        assert_eq!(loaded.encoding_job, Some(job));
    }

    #[test]
    fn test_complete_flattens_outputs() {
        let mut state = state();
        let outputs = ResolvedOutputs {
            hls_url: Some("https://cdn.example.com/12345/hls/a.m3u8".into()),
            ..Default::default()
        };
        state.complete(CompletionReport::default(), outputs, Utc::now());
        assert_eq!(state.workflow_status, "Complete");
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["hlsUrl"], "https://cdn.example.com/12345/hls/a.m3u8");
        assert!(value["endTime"].is_string());
    }
}
