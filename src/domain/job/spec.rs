use crate::domain::profile::FrameCaptureGeometry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Container families the job builder knows how to default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    File,
    Hls,
    DashIso,
    Cmaf,
    MsSmooth,
}

impl GroupKind {
    pub fn from_settings_type(settings_type: &str) -> Option<Self> {
        match settings_type {
            "FILE_GROUP_SETTINGS" => Some(GroupKind::File),
            "HLS_GROUP_SETTINGS" => Some(GroupKind::Hls),
            "DASH_ISO_GROUP_SETTINGS" => Some(GroupKind::DashIso),
            "CMAF_GROUP_SETTINGS" => Some(GroupKind::Cmaf),
            "MS_SMOOTH_GROUP_SETTINGS" => Some(GroupKind::MsSmooth),
            _ => None,
        }
    }

    pub fn settings_type(self) -> &'static str {
        match self {
            GroupKind::File => "FILE_GROUP_SETTINGS",
            GroupKind::Hls => "HLS_GROUP_SETTINGS",
            GroupKind::DashIso => "DASH_ISO_GROUP_SETTINGS",
            GroupKind::Cmaf => "CMAF_GROUP_SETTINGS",
            GroupKind::MsSmooth => "MS_SMOOTH_GROUP_SETTINGS",
        }
    }

    /// Key of the per-container settings object inside `outputGroupSettings`.
    pub fn settings_key(self) -> &'static str {
        match self {
            GroupKind::File => "fileGroupSettings",
            GroupKind::Hls => "hlsGroupSettings",
            GroupKind::DashIso => "dashIsoGroupSettings",
            GroupKind::Cmaf => "cmafGroupSettings",
            GroupKind::MsSmooth => "msSmoothGroupSettings",
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            GroupKind::File => "File Group",
            GroupKind::Hls => "HLS Group",
            GroupKind::DashIso => "DASH ISO",
            GroupKind::Cmaf => "CMAF",
            GroupKind::MsSmooth => "MS Smooth",
        }
    }

    /// Destination directory under the job's output root.
    pub fn directory(self) -> &'static str {
        match self {
            GroupKind::File => "mp4",
            GroupKind::Hls => "hls",
            GroupKind::DashIso => "dash",
            GroupKind::Cmaf => "cmaf",
            GroupKind::MsSmooth => "mss",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputGroupSettings {
    #[serde(rename = "type")]
    pub group_type: String,
    /// Per-container settings objects, keyed by e.g. `hlsGroupSettings`.
    #[serde(flatten)]
    pub containers: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputGroupSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    pub output_group_settings: OutputGroupSettings,
    /// Rendition descriptors, kept in their service representation.
    #[serde(default)]
    pub outputs: Vec<Value>,
}

impl OutputGroupSpec {
    pub fn new(kind: GroupKind, settings: Map<String, Value>) -> Self {
        let mut containers = Map::new();
        containers.insert(kind.settings_key().to_string(), Value::Object(settings));
        Self {
            name: Some(kind.default_name().to_string()),
            custom_name: None,
            output_group_settings: OutputGroupSettings {
                group_type: kind.settings_type().to_string(),
                containers,
            },
            outputs: Vec::new(),
        }
    }

    pub fn kind(&self) -> Option<GroupKind> {
        GroupKind::from_settings_type(&self.output_group_settings.group_type)
    }

    /// A field of this group's own container settings, e.g. `segmentLength`.
    pub fn setting(&self, field: &str) -> Option<&Value> {
        let kind = self.kind()?;
        self.output_group_settings
            .containers
            .get(kind.settings_key())?
            .get(field)
    }
}

/// A named job template as returned by the transcoding service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTemplate {
    pub name: String,
    #[serde(default)]
    pub output_groups: Vec<OutputGroupSpec>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccelerationMode {
    #[default]
    Disabled,
    Enabled,
    Preferred,
}

impl AccelerationMode {
    /// Unset or unrecognised values fall back to `Disabled`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("ENABLED") => AccelerationMode::Enabled,
            Some("PREFERRED") => AccelerationMode::Preferred,
            None | Some("") | Some("DISABLED") => AccelerationMode::Disabled,
            Some(other) => {
                tracing::warn!("unrecognised acceleration mode {:?}, disabling", other);
                AccelerationMode::Disabled
            }
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, AccelerationMode::Enabled | AccelerationMode::Preferred)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccelerationMode::Disabled => "DISABLED",
            AccelerationMode::Enabled => "ENABLED",
            AccelerationMode::Preferred => "PREFERRED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimecodeSource {
    Embedded,
    Zerobased,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSelector {
    pub offset: i32,
    pub default_selection: String,
    pub program_selection: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSelector {
    pub color_space: String,
    pub rotate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSpec {
    pub audio_selectors: BTreeMap<String, AudioSelector>,
    pub video_selector: VideoSelector,
    pub filter_enable: String,
    pub psi_control: String,
    pub filter_strength: i32,
    pub deblock_filter: String,
    pub denoise_filter: String,
    pub timecode_source: TimecodeSource,
    pub file_input: String,
}

impl InputSpec {
    pub fn new(file_input: String, rotate: String) -> Self {
        let mut audio_selectors = BTreeMap::new();
        audio_selectors.insert(
            "Audio Selector 1".to_string(),
            AudioSelector {
                offset: 0,
                default_selection: "NOT_DEFAULT".to_string(),
                program_selection: 1,
            },
        );
        Self {
            audio_selectors,
            video_selector: VideoSelector {
                color_space: "FOLLOW".to_string(),
                rotate,
            },
            filter_enable: "AUTO".to_string(),
            psi_control: "USE_PSI".to_string(),
            filter_strength: 0,
            deblock_filter: "DISABLED".to_string(),
            denoise_filter: "DISABLED".to_string(),
            timecode_source: TimecodeSource::Embedded,
            file_input,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimecodeConfig {
    pub source: TimecodeSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccelerationSettings {
    pub mode: AccelerationMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub guid: String,
    pub workflow: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSettings {
    pub inputs: Vec<InputSpec>,
    pub output_groups: Vec<OutputGroupSpec>,
    pub timecode_config: TimecodeConfig,
}

/// Everything submitted to the transcoding service for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpecification {
    pub job_template: String,
    pub role: String,
    pub user_metadata: UserMetadata,
    pub settings: JobSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration_settings: Option<AccelerationSettings>,
}

/// Per-invocation inputs to the job builder.
#[derive(Debug, Clone, PartialEq)]
pub struct JobContext {
    pub guid: String,
    pub workflow_name: String,
    pub role: String,
    pub template_name: String,
    pub source_bucket: String,
    pub source_video: String,
    pub destination_bucket: String,
    pub input_rotate: String,
    pub frame_capture: Option<FrameCaptureGeometry>,
    pub acceleration: AccelerationMode,
}

impl JobContext {
    pub fn input_path(&self) -> String {
        format!("s3://{}/{}", self.source_bucket, self.source_video)
    }

    /// Root under which every output group writes.
    pub fn destination_root(&self) -> String {
        format!("s3://{}/{}", self.destination_bucket, self.guid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_kind_round_trips_settings_type() {
        for kind in [
            GroupKind::File,
            GroupKind::Hls,
            GroupKind::DashIso,
            GroupKind::Cmaf,
            GroupKind::MsSmooth,
        ] {
            assert_eq!(GroupKind::from_settings_type(kind.settings_type()), Some(kind));
        }
        assert_eq!(GroupKind::from_settings_type("RTMP_GROUP_SETTINGS"), None);
    }

    #[test]
    fn test_output_group_from_template_json() {
        let group: OutputGroupSpec = serde_json::from_value(json!({
            "name": "Apple HLS",
            "outputGroupSettings": {
                "type": "HLS_GROUP_SETTINGS",
                "hlsGroupSettings": { "segmentLength": 6 }
            },
            "outputs": [{ "preset": "hls_1080p", "nameModifier": "_1080p" }]
        }))
        .unwrap();
        assert_eq!(group.kind(), Some(GroupKind::Hls));
        assert_eq!(group.setting("segmentLength"), Some(&json!(6)));
        assert_eq!(group.outputs.len(), 1);
    }

    #[test]
    fn test_acceleration_mode_parse() {
        assert_eq!(AccelerationMode::parse(Some("ENABLED")), AccelerationMode::Enabled);
        assert_eq!(AccelerationMode::parse(Some("PREFERRED")), AccelerationMode::Preferred);
        assert_eq!(AccelerationMode::parse(Some("DISABLED")), AccelerationMode::Disabled);
        assert_eq!(AccelerationMode::parse(Some("")), AccelerationMode::Disabled);
        assert_eq!(AccelerationMode::parse(None), AccelerationMode::Disabled);
        assert_eq!(AccelerationMode::parse(Some("turbo")), AccelerationMode::Disabled);
        assert!(AccelerationMode::Preferred.is_active());
        assert!(!AccelerationMode::Disabled.is_active());
    }

    #[test]
    fn test_context_paths() {
        let context = JobContext {
            guid: "12345".into(),
            workflow_name: "vod".into(),
            role: "Role".into(),
            template_name: "t".into(),
            source_bucket: "src".into(),
            source_video: "folder/video.mp4".into(),
            destination_bucket: "dest".into(),
            input_rotate: "DEGREE_0".into(),
            frame_capture: None,
            acceleration: AccelerationMode::Disabled,
        };
        assert_eq!(context.input_path(), "s3://src/folder/video.mp4");
        assert_eq!(context.destination_root(), "s3://dest/12345");
    }
}
