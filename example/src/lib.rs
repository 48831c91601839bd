mod app;

use std::path::{Path, PathBuf};

use anyhow::Context;
use notch_ui::{EntryPoint, NotchConfig};

pub use app::DemoApp;

/// Where the demo looks for its RON config.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("notch").join("config.ron"))
}

/// Loads the config at `path`, or the defaults when there is no file there.
///
/// A file that exists but cannot be read or parsed is an error.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<NotchConfig> {
    match path {
        Some(path) if path.exists() => NotchConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        _ => Ok(NotchConfig::default()),
    }
}

/// Loads the config and runs the demo. Logging is installed by
/// [`EntryPoint::run_desktop`].
pub fn desktop_main() -> anyhow::Result<()> {
    let config = load_config(config_path().as_deref())?;

    let app = DemoApp::new(config.resize_debounce());
    EntryPoint::new(app)
        .config(config)
        .run_desktop()
        .map_err(|err| anyhow::anyhow!("notch demo exited with an error: {err}"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("notch-example-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_config_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), NotchConfig::default());
        let missing = Path::new("/definitely/not/here/notch.ron");
        assert_eq!(load_config(Some(missing)).unwrap(), NotchConfig::default());
    }

    #[test]
    fn config_file_is_loaded() {
        let path = scratch_file("valid.ron", "(window_title: \"Gain\", resize_debounce_ms: 120)");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.window_title, "Gain");
        assert_eq!(config.resize_debounce_ms, 120);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let path = scratch_file("broken.ron", "(window_title: ");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("broken.ron"));
    }
}
