//! Functions for loading example settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::*;

/// A structure containing configuration data for an example, which are used to name it,
/// pace its frame loop and find its shader sources.
///
/// Every field falls back to its default when missing, so a settings file only needs to
/// mention what it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the example, used in log messages. A window implementation could reuse it
    /// as its title.
    pub title: String,
    pub engine: EngineParams,
    /// Directory that relative shader paths are resolved against.
    pub shader_root: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            title: "redbook".to_owned(),
            engine: EngineParams::default(),
            shader_root: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Frame durations are clamped to `1 / min_fps`, zero disables clamping.
    pub min_fps: u32,
    /// The frame loop sleeps to stay below this rate, zero means unbounded.
    pub max_fps: u32,
    /// Averages the frame duration over this many frames, zero disables smoothing.
    pub time_smooth_step: u32,
    /// Stops after this many frames.
    pub max_frames: Option<u64>,
    /// Releasing the escape key quits.
    pub escape_to_quit: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        EngineParams {
            min_fps: 0,
            max_fps: 60,
            time_smooth_step: 0,
            max_frames: None,
            escape_to_quit: true,
        }
    }
}

impl Settings {
    /// Loads settings from a json file.
    pub fn load<T: AsRef<Path>>(path: T) -> Result<Settings> {
        let path = path.as_ref();
        let buf = fs::read_to_string(path)
            .with_context(|_| format!("Failed to read settings {}.", path.display()))?;

        Settings::from_json(&buf)
    }

    pub fn from_json(buf: &str) -> Result<Settings> {
        serde_json::from_str(buf)
            .map_err(|err| err_format!("Failed to parse settings: {}", err))
    }
}
