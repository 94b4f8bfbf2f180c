use super::report::{CompletionReport, OutputGroupResult, ReportedGroupType};
use super::url::public_url;
use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    pub guid: String,
    pub cdn_host: String,
    pub frame_capture: bool,
    pub destination_bucket: String,
}

impl ResolutionContext {
    /// Listing prefix under which frame captures are written.
    pub fn thumbnail_prefix(&self) -> String {
        format!("{}/thumbnails", self.guid)
    }
}

/// Storage paths and CDN URLs for everything a job produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOutputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls_playlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_playlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mp4_outputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mp4_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mss_playlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mss_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmaf_dash_playlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmaf_dash_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmaf_hls_playlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmaf_hls_url: Option<String>,
    /// Published frame capture; holds at most the latest one.
    #[serde(rename = "thumbNails", default, skip_serializing_if = "Vec::is_empty")]
    pub thumbnails: Vec<String>,
    #[serde(rename = "thumbNailsUrls", default, skip_serializing_if = "Vec::is_empty")]
    pub thumbnail_urls: Vec<String>,
}

fn playlist_pair(
    group: &OutputGroupResult,
    index: usize,
    cdn_host: &str,
) -> Result<(Option<String>, Option<String>)> {
    let path = group.playlist(index)?;
    let url = public_url(cdn_host, path)?;
    Ok((Some(path.to_string()), Some(url)))
}

fn resolve_file_group(
    group: &OutputGroupResult,
    cdn_host: &str,
    outputs: &mut ResolvedOutputs,
) -> Result<()> {
    let files: Vec<String> = group
        .output_details
        .iter()
        .filter_map(|detail| detail.output_file_paths.first().cloned())
        .collect();

    let Some(first) = files.first() else {
        return Ok(());
    };
    if first.rsplit('.').next() != Some("mp4") {
        warn!("ignoring file group whose first output is {}", first);
        return Ok(());
    }

    outputs.mp4_urls = files
        .iter()
        .map(|file| public_url(cdn_host, file))
        .collect::<Result<Vec<_>>>()?;
    outputs.mp4_outputs = files;
    Ok(())
}

/// Classify and resolve every output group of a completion report.
///
/// Any unrecognised group type fails the whole resolution.
pub fn resolve_groups(
    report: &CompletionReport,
    context: &ResolutionContext,
) -> Result<ResolvedOutputs> {
    if report.output_group_details.is_empty() {
        return Err(PipelineError::NoOutputGroups);
    }

    let cdn_host = context.cdn_host.as_str();
    let mut outputs = ResolvedOutputs::default();

    for group in &report.output_group_details {
        let group_type = group.reported_type()?;
        info!("{} found in outputs", group.group_type);

        match group_type {
            ReportedGroupType::Hls => {
                (outputs.hls_playlist, outputs.hls_url) = playlist_pair(group, 0, cdn_host)?;
            }
            ReportedGroupType::DashIso => {
                (outputs.dash_playlist, outputs.dash_url) = playlist_pair(group, 0, cdn_host)?;
            }
            ReportedGroupType::File => resolve_file_group(group, cdn_host, &mut outputs)?,
            ReportedGroupType::MsSmooth => {
                (outputs.mss_playlist, outputs.mss_url) = playlist_pair(group, 0, cdn_host)?;
            }
            ReportedGroupType::Cmaf => {
                (outputs.cmaf_dash_playlist, outputs.cmaf_dash_url) =
                    playlist_pair(group, 0, cdn_host)?;
                (outputs.cmaf_hls_playlist, outputs.cmaf_hls_url) =
                    playlist_pair(group, 1, cdn_host)?;
            }
        }
    }

    Ok(outputs)
}

/// Pick the frame capture to publish from a key-ordered listing.
///
/// The last key stands in for the most recent capture: frame captures are numbered
/// sequentially, so this relies on the listing being sorted ascending by key.
pub fn latest_thumbnail(
    keys: &[String],
    context: &ResolutionContext,
) -> Result<(String, String)> {
    let key = keys.last().ok_or_else(|| PipelineError::NoThumbnailsFound {
        prefix: context.thumbnail_prefix(),
    })?;
    Ok((
        format!("s3://{}/{}", context.destination_bucket, key),
        format!("https://{}/{}", context.cdn_host, key),
    ))
}
