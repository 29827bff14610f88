use crate::preset::{PresetName, DEFAULT_PRESET};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Directory scanned for source clips
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory the encoded files are written to (created if missing)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Preset name; unknown names fall back to the default preset
    #[serde(default = "default_preset")]
    pub preset: String,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("input")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            preset: default_preset(),
        }
    }
}

impl BatchConfig {
    /// Apply command-line values on top of the configured ones.
    pub fn with_overrides(
        mut self,
        input_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        preset: Option<PresetName>,
    ) -> Self {
        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        if let Some(name) = preset {
            self.preset = name.as_str().to_string();
        }
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}
