//! Runtime and window configuration.
//!
//! ## Usage
//!
//! Build a [`NotchConfig`] in code, or load one from a RON file:
//!
//! ```
//! use notch_ui::config::NotchConfig;
//!
//! let config = NotchConfig::from_ron_str(r#"(window_title: "Volume", resize_debounce_ms: 150)"#)
//!     .unwrap_or_default();
//! assert_eq!(config.window_title, "Volume");
//! assert_eq!(config.window_width, NotchConfig::default().window_width);
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;

/// Quiet period after the last resize event before controls re-measure.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Errors raised while loading a [`NotchConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid RON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Configuration for the notch runtime and its window.
///
/// Missing fields in a RON file fall back to [`NotchConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotchConfig {
    /// Window title.
    pub window_title: String,
    /// Initial inner width of the window, in logical pixels.
    pub window_width: u32,
    /// Initial inner height of the window, in logical pixels.
    pub window_height: u32,
    /// How long resize events must stop before controls re-measure.
    pub resize_debounce_ms: u64,
    /// Colour the frame is cleared to before drawing.
    pub clear_color: Color,
}

impl Default for NotchConfig {
    fn default() -> Self {
        Self {
            window_title: "Notch".to_string(),
            window_width: 480,
            window_height: 160,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE.as_millis() as u64,
            clear_color: Color::from_rgb_u8(0xf4, 0xf4, 0xf6),
        }
    }
}

impl NotchConfig {
    /// The resize quiet period as a [`Duration`].
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Parses a config from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Reads and parses a RON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Serialises to pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
