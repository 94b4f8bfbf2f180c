//! Completion report emitted by the transcoding service when a job finishes.

use crate::domain::job::spec::UserMetadata;
use crate::error::PipelineError;
use serde::{Deserialize, Deserializer, Serialize};

/// Lists may be sent as `null` rather than omitted.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionReport {
    pub timestamp: i64,
    pub account_id: String,
    pub queue: String,
    pub job_id: String,
    pub status: String,
    pub user_metadata: UserMetadata,
    #[serde(deserialize_with = "nullable_vec")]
    pub output_group_details: Vec<OutputGroupResult>,
    pub padding_inserted: i64,
    pub black_video_detected: i64,
    #[serde(deserialize_with = "nullable_vec")]
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputGroupResult {
    #[serde(deserialize_with = "nullable_vec")]
    pub output_details: Vec<OutputDetail>,
    #[serde(deserialize_with = "nullable_vec")]
    pub playlist_file_paths: Vec<String>,
    #[serde(rename = "type")]
    pub group_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputDetail {
    #[serde(deserialize_with = "nullable_vec")]
    pub output_file_paths: Vec<String>,
    pub duration_in_ms: i64,
    pub video_details: Option<VideoDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoDetail {
    pub width_in_px: i64,
    pub height_in_px: i64,
    pub average_bitrate: f64,
    pub qvbr_avg_quality: f64,
    pub qvbr_min_quality: f64,
    pub qvbr_max_quality: f64,
    pub qvbr_min_quality_location: f64,
    pub qvbr_max_quality_location: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Warning {
    pub code: i64,
    pub count: i64,
}

/// Output group types a completion report may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedGroupType {
    Hls,
    DashIso,
    File,
    MsSmooth,
    Cmaf,
}

impl TryFrom<&str> for ReportedGroupType {
    type Error = PipelineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "HLS_GROUP" => Ok(ReportedGroupType::Hls),
            "DASH_ISO_GROUP" => Ok(ReportedGroupType::DashIso),
            "FILE_GROUP" => Ok(ReportedGroupType::File),
            "MS_SMOOTH_GROUP" => Ok(ReportedGroupType::MsSmooth),
            "CMAF_GROUP" => Ok(ReportedGroupType::Cmaf),
            other => Err(PipelineError::UnknownOutputGroupType(other.to_string())),
        }
    }
}

impl ReportedGroupType {
    pub fn label(self) -> &'static str {
        match self {
            ReportedGroupType::Hls => "HLS",
            ReportedGroupType::DashIso => "DASH",
            ReportedGroupType::File => "FILE",
            ReportedGroupType::MsSmooth => "MSS",
            ReportedGroupType::Cmaf => "CMAF",
        }
    }
}

impl OutputGroupResult {
    pub fn reported_type(&self) -> Result<ReportedGroupType, PipelineError> {
        ReportedGroupType::try_from(self.group_type.as_str())
    }

    pub fn playlist(&self, index: usize) -> Result<&str, PipelineError> {
        let group = self.reported_type()?.label();
        self.playlist_file_paths
            .get(index)
            .map(String::as_str)
            .ok_or(PipelineError::MissingPlaylist { group, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_report_with_null_lists() {
        let report: CompletionReport = serde_json::from_value(json!({
            "jobId": "htprrb",
            "status": "COMPLETE",
            "userMetadata": { "guid": "guid", "workflow": "vod10" },
            "outputGroupDetails": [{
                "outputDetails": [{
                    "outputFilePaths": ["s3://vod-destination/12345/mp4/dude_3.0Mbps.mp4"],
                    "durationInMs": 13471,
                    "videoDetails": { "widthInPx": 1280, "heightInPx": 720 }
                }],
                "playlistFilePaths": null,
                "type": "FILE_GROUP"
            }],
            "warnings": null
        }))
        .unwrap();

        assert_eq!(report.job_id, "htprrb");
        assert_eq!(report.user_metadata.guid, "guid");
        let group = &report.output_group_details[0];
        assert!(group.playlist_file_paths.is_empty());
        assert_eq!(group.reported_type().unwrap(), ReportedGroupType::File);
        let detail = &group.output_details[0];
        assert_eq!(detail.duration_in_ms, 13471);
        assert_eq!(detail.video_details.as_ref().unwrap().height_in_px, 720);
    }

    #[test]
    fn test_unknown_type() {
        let group = OutputGroupResult {
            group_type: "RTMP_GROUP".into(),
            ..Default::default()
        };
        assert!(matches!(
            group.reported_type(),
            Err(PipelineError::UnknownOutputGroupType(t)) if t == "RTMP_GROUP"
        ));
    }

    #[test]
    fn test_missing_playlist() {
        let group = OutputGroupResult {
            group_type: "CMAF_GROUP".into(),
            playlist_file_paths: vec!["a.mpd".into()],
            ..Default::default()
        };
        assert_eq!(group.playlist(0).unwrap(), "a.mpd");
        assert!(matches!(
            group.playlist(1),
            Err(PipelineError::MissingPlaylist { group: "CMAF", index: 1 })
        ));
    }
}
