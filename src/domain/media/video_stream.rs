use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoStream {
    pub codec: String,
    pub bitrate: u64,
    pub duration: f64,
    pub frame_count: u64,
    pub width: u32,
    pub height: u32,
    pub framerate: f64,
    pub aspect_ratio: String,
    pub color_space: String,
}

#[cfg(test)]
mod tests {
    use super::VideoStream;
    use serde_json::json;

    #[test]
    fn test_from_report_valid_video() {
        let stream_data = json!({
            "codec": "AVC",
            "bitrate": 5000000,
            "duration": 13.471,
            "frameCount": 404,
            "width": 1920,
            "height": 1080,
            "framerate": 29.97,
            "aspectRatio": "1.778",
            "colorSpace": "YUV"
        });
        let stream: VideoStream = serde_json::from_value(stream_data).unwrap();
        assert_eq!(stream.codec, "AVC");
        assert_eq!(stream.bitrate, 5000000);
        assert_eq!(stream.frame_count, 404);
        assert_eq!(stream.width, 1920);
        assert_eq!(stream.height, 1080);
        assert_eq!(stream.aspect_ratio, "1.778");
    }

    #[test]
    fn test_from_report_missing_fields_default_to_zero() {
        let stream: VideoStream = serde_json::from_value(json!({ "codec": "HEVC" })).unwrap();
        assert_eq!(stream.codec, "HEVC");
        assert_eq!(stream.width, 0);
        assert_eq!(stream.height, 0);
        assert_eq!(stream.color_space, "");
    }
}
