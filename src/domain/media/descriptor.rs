use super::audio_stream::AudioStream;
use super::video_stream::VideoStream;
use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerInfo {
    pub format: String,
    pub file_size: u64,
    pub duration: f64,
    pub total_bitrate: u64,
}

/// Structured view of the media inspection report produced upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaDescriptor {
    pub filename: String,
    pub container: ContainerInfo,
    pub video: Vec<VideoStream>,
    pub audio: Vec<AudioStream>,
}

impl MediaDescriptor {
    /// Parse the report as stored in the workflow record.
    ///
    /// The stored form may carry line breaks and escaped quotes; both are
    /// normalised before decoding.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalised = raw.replace('\n', "").replace("\\\"", "\"");
        serde_json::from_str(&normalised).map_err(PipelineError::InvalidMediaInfo)
    }

    /// First video stream. Its absence is fatal for profile selection.
    pub fn primary_video(&self) -> Result<&VideoStream> {
        self.video.first().ok_or(PipelineError::NoVideoStream)
    }
}
