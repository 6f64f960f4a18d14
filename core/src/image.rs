//! Image URL resolution.
//!
//! Stored images are addressed by an opaque identifier. The URL for a
//! given rendition is built by substituting a size preset (and optionally
//! the retina suffix) into a fixed template:
//!
//! ```text
//! https://images.igdb.com/igdb/image/upload/t_<preset>[_2x]/<image_id>.jpg
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ApiError, Result};

pub const IMAGE_BASE_URL: &str = "https://images.igdb.com/igdb/image/upload";

/// Supported renditions, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizePreset {
    Micro,
    Thumb,
    CoverSmall,
    LogoMed,
    CoverBig,
    ScreenshotMed,
    ScreenshotBig,
    ScreenshotHuge,
    Hd720,
    FullHd1080,
}

impl SizePreset {
    pub const ALL: [SizePreset; 10] = [
        SizePreset::Micro,
        SizePreset::Thumb,
        SizePreset::CoverSmall,
        SizePreset::LogoMed,
        SizePreset::CoverBig,
        SizePreset::ScreenshotMed,
        SizePreset::ScreenshotBig,
        SizePreset::ScreenshotHuge,
        SizePreset::Hd720,
        SizePreset::FullHd1080,
    ];

    /// Path segment substituted after `t_`.
    pub fn as_str(self) -> &'static str {
        match self {
            SizePreset::Micro => "micro",
            SizePreset::Thumb => "thumb",
            SizePreset::CoverSmall => "cover_small",
            SizePreset::LogoMed => "logo_med",
            SizePreset::CoverBig => "cover_big",
            SizePreset::ScreenshotMed => "screenshot_med",
            SizePreset::ScreenshotBig => "screenshot_big",
            SizePreset::ScreenshotHuge => "screenshot_huge",
            SizePreset::Hd720 => "720p",
            SizePreset::FullHd1080 => "1080p",
        }
    }

    /// Width and height in pixels at the standard ratio.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            SizePreset::Micro => (35, 35),
            SizePreset::Thumb => (90, 90),
            SizePreset::CoverSmall => (90, 128),
            SizePreset::LogoMed => (284, 160),
            SizePreset::CoverBig => (264, 374),
            SizePreset::ScreenshotMed => (569, 320),
            SizePreset::ScreenshotBig => (889, 500),
            SizePreset::ScreenshotHuge => (1280, 720),
            SizePreset::Hd720 => (1280, 720),
            SizePreset::FullHd1080 => (1920, 1080),
        }
    }

    /// Ratios this preset can be rendered at. The video-sized presets are
    /// already full resolution and have no retina variant.
    pub fn ratios(self) -> &'static [Ratio] {
        match self {
            SizePreset::Hd720 | SizePreset::FullHd1080 => &[Ratio::Standard],
            _ => &[Ratio::Standard, Ratio::Retina],
        }
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizePreset {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        SizePreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| ApiError::UnknownSizePreset(s.to_string()))
    }
}

/// Pixel density of the rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ratio {
    #[default]
    Standard,
    /// Double density, requested with the `_2x` suffix.
    Retina,
}

impl Ratio {
    pub fn as_str(self) -> &'static str {
        match self {
            Ratio::Standard => "1x",
            Ratio::Retina => "2x",
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Ratio::Standard => "",
            Ratio::Retina => "_2x",
        }
    }
}

/// Builds the URL of `image_id` rendered at `preset` and `ratio`.
pub fn image_url(image_id: &str, preset: SizePreset, ratio: Ratio) -> Result<String> {
    if image_id.trim().is_empty() {
        return Err(ApiError::EmptyField { what: "image id" });
    }
    if !preset.ratios().contains(&ratio) {
        return Err(ApiError::UnsupportedRatio {
            preset: preset.as_str(),
            ratio: ratio.as_str(),
        });
    }
    Ok(format!(
        "{IMAGE_BASE_URL}/t_{}{}/{image_id}.jpg",
        preset.as_str(),
        ratio.suffix()
    ))
}

/// Like [`image_url`], with the preset given by name (e.g. `"cover_big"`).
pub fn image_url_named(image_id: &str, preset: &str, ratio: Ratio) -> Result<String> {
    image_url(image_id, preset.parse()?, ratio)
}
