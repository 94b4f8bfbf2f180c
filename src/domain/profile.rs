//! Encoding profile selection: source height to resolution tier.

use crate::domain::media::MediaDescriptor;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Output resolution tiers, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum ResolutionTier {
    P2160,
    P1080,
    P720,
}

impl ResolutionTier {
    pub const ALL: [ResolutionTier; 3] = [
        ResolutionTier::P2160,
        ResolutionTier::P1080,
        ResolutionTier::P720,
    ];

    pub fn height(self) -> u32 {
        match self {
            ResolutionTier::P2160 => 2160,
            ResolutionTier::P1080 => 1080,
            ResolutionTier::P720 => 720,
        }
    }

    /// Frame capture width paired with this tier's height.
    pub fn capture_width(self) -> u32 {
        match self {
            ResolutionTier::P2160 => 3840,
            ResolutionTier::P1080 => 1920,
            ResolutionTier::P720 => 1280,
        }
    }

    /// Tier closest to `height`. On equal distance the earlier tier in [`Self::ALL`] wins.
    pub fn nearest(height: u32) -> Self {
        let mut chosen = ResolutionTier::ALL[0];
        let mut min_diff = u64::MAX;
        for tier in ResolutionTier::ALL {
            let diff = (i64::from(height) - i64::from(tier.height())).unsigned_abs();
            if diff < min_diff {
                min_diff = diff;
                chosen = tier;
            }
        }
        chosen
    }
}

impl From<ResolutionTier> for u32 {
    fn from(tier: ResolutionTier) -> Self {
        tier.height()
    }
}

impl TryFrom<u32> for ResolutionTier {
    type Error = String;

    fn try_from(height: u32) -> std::result::Result<Self, Self::Error> {
        ResolutionTier::ALL
            .into_iter()
            .find(|tier| tier.height() == height)
            .ok_or_else(|| format!("{} is not an encoding profile", height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameCaptureGeometry {
    pub width: u32,
    pub height: u32,
}

impl From<ResolutionTier> for FrameCaptureGeometry {
    fn from(tier: ResolutionTier) -> Self {
        Self {
            width: tier.capture_width(),
            height: tier.height(),
        }
    }
}

/// Job template names configured per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTemplates {
    pub p2160: String,
    pub p1080: String,
    pub p720: String,
}

impl TierTemplates {
    pub fn for_tier(&self, tier: ResolutionTier) -> &str {
        match tier {
            ResolutionTier::P2160 => &self.p2160,
            ResolutionTier::P1080 => &self.p1080,
            ResolutionTier::P720 => &self.p720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChoice {
    pub tier: ResolutionTier,
    pub source_width: u32,
    pub source_height: u32,
    pub frame_capture: Option<FrameCaptureGeometry>,
    /// Caller-supplied template overriding the tier's template.
    pub custom_template: Option<String>,
}

impl ProfileChoice {
    pub fn is_custom_template(&self) -> bool {
        self.custom_template.is_some()
    }

    /// Template the job must be built from.
    pub fn template_name<'a>(&'a self, templates: &'a TierTemplates) -> &'a str {
        match &self.custom_template {
            Some(name) => name,
            None => templates.for_tier(self.tier),
        }
    }
}

pub fn select_profile(
    descriptor: &MediaDescriptor,
    explicit_template: Option<&str>,
    frame_capture_enabled: bool,
) -> Result<ProfileChoice> {
    let video = descriptor.primary_video()?;
    let tier = ResolutionTier::nearest(video.height);

    Ok(ProfileChoice {
        tier,
        source_width: video.width,
        source_height: video.height,
        frame_capture: frame_capture_enabled.then(|| FrameCaptureGeometry::from(tier)),
        custom_template: explicit_template.map(str::to_owned),
    })
}
