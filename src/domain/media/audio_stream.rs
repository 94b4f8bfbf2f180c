use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioStream {
    pub codec: String,
    pub bitrate: u64,
    pub duration: f64,
    pub frame_count: u64,
    pub bitrate_mode: String,
    pub channels: u32,
    pub sampling_rate: u32,
    #[serde(rename = "samplePerFrame")]
    pub samples_per_frame: u32,
}
