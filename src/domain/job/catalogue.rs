//! Default output groups, one per container family, plus the frame capture group.

use super::spec::{GroupKind, OutputGroupSpec};
use crate::domain::profile::FrameCaptureGeometry;
use serde_json::{json, Map, Value};

pub fn default_group(kind: GroupKind, destination_root: &str) -> OutputGroupSpec {
    let mut settings = Map::new();
    match kind {
        GroupKind::File => {}
        GroupKind::Hls => {
            settings.insert("segmentLength".into(), json!(5));
            settings.insert("minSegmentLength".into(), json!(0));
        }
        GroupKind::DashIso | GroupKind::Cmaf => {
            settings.insert("segmentLength".into(), json!(30));
            settings.insert("fragmentLength".into(), json!(3));
        }
        GroupKind::MsSmooth => {
            settings.insert("fragmentLength".into(), json!(2));
            settings.insert("manifestEncoding".into(), json!("UTF8"));
        }
    }
    settings.insert(
        "destination".into(),
        Value::String(format!("{}/{}/", destination_root, kind.directory())),
    );
    OutputGroupSpec::new(kind, settings)
}

/// Still-frame capture group. Always a file group writing under `thumbnails/`.
pub fn frame_capture_group(
    geometry: FrameCaptureGeometry,
    destination_root: &str,
) -> OutputGroupSpec {
    let mut settings = Map::new();
    settings.insert(
        "destination".into(),
        Value::String(format!("{}/thumbnails/", destination_root)),
    );
    let mut group = OutputGroupSpec::new(GroupKind::File, settings);
    group.custom_name = Some("Frame Capture".to_string());
    group.outputs.push(json!({
        "nameModifier": "_thumb",
        "containerSettings": { "container": "RAW" },
        "videoDescription": {
            "colorMetadata": "INSERT",
            "afdSignaling": "NONE",
            "sharpness": 100,
            "height": geometry.height,
            "respondToAfd": "NONE",
            "timecodeInsertion": "DISABLED",
            "width": geometry.width,
            "scalingBehavior": "DEFAULT",
            "antiAlias": "ENABLED",
            "codecSettings": {
                "frameCaptureSettings": {
                    "maxCaptures": 10000000,
                    "quality": 80,
                    "framerateDenominator": 5,
                    "framerateNumerator": 1
                },
                "codec": "FRAME_CAPTURE"
            },
            "dropFrameTimecode": "ENABLED"
        }
    }));
    group
}
