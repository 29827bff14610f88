//! Encoding presets.
//!
//! The preset table is static: every preset targets a 1080x1920 vertical
//! frame and differs only in frame rate and bitrate.

use clap::ValueEnum;
use shortform_av::actions::EncodeSettings;
use std::fmt;

/// Name of the preset used when a lookup misses.
pub const DEFAULT_PRESET: &str = "tiktok";

/// A named bundle of encoding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub video_bitrate: &'static str,
    pub video_codec: &'static str,
}

impl Preset {
    /// Encoder settings for this preset.
    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings::new(
            self.width,
            self.height,
            self.frame_rate,
            self.video_bitrate,
            self.video_codec,
        )
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}x{} @ {}fps, {} {})",
            self.name,
            self.width,
            self.height,
            self.frame_rate,
            self.video_bitrate,
            self.video_codec
        )
    }
}

static PRESETS: [Preset; 2] = [
    Preset {
        name: "tiktok",
        width: 1080,
        height: 1920,
        frame_rate: 30,
        video_bitrate: "5M",
        video_codec: "h264_nvenc",
    },
    Preset {
        name: "youtube",
        width: 1080,
        height: 1920,
        frame_rate: 60,
        video_bitrate: "8M",
        video_codec: "h264_nvenc",
    },
];

/// All known presets, default first.
pub fn presets() -> &'static [Preset] {
    &PRESETS
}

/// Look up a preset by name.
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}

/// Resolve a preset by name, falling back to the default for unknown names.
pub fn resolve(name: &str) -> &'static Preset {
    find(name).unwrap_or_else(|| {
        tracing::debug!("Unknown preset {:?}, using {}", name, DEFAULT_PRESET);
        &PRESETS[0]
    })
}

/// Preset names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PresetName {
    #[default]
    Tiktok,
    Youtube,
}

impl PresetName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Tiktok => "tiktok",
            PresetName::Youtube => "youtube",
        }
    }

    pub fn preset(&self) -> &'static Preset {
        resolve(self.as_str())
    }
}
