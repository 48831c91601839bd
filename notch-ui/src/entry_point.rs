//! Application entry builder.
//!
//! ## Usage
//!
//! Configure startup, install logging and launch the renderer in one place.

use crate::{
    config::NotchConfig,
    renderer::{NotchApp, Renderer, RendererError},
};

/// Builder for application entry configuration and startup.
pub struct EntryPoint<A: NotchApp> {
    app: A,
    config: NotchConfig,
}

impl<A: NotchApp> EntryPoint<A> {
    /// Creates a new entry point for `app` with the default config.
    pub fn new(app: A) -> Self {
        Self {
            app,
            config: NotchConfig::default(),
        }
    }

    /// Overrides the runtime configuration for this entry.
    pub fn config(mut self, config: NotchConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs the tracing subscriber and runs the renderer until the window
    /// closes.
    pub fn run_desktop(self) -> Result<(), RendererError> {
        init_tracing();
        Renderer::run_with_config(self.app, self.config)
    }
}

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG`.
///
/// Falls back to `error,notch_ui=info,notch_components=info` when `RUST_LOG`
/// is unset or invalid. Calling this more than once is harmless.
pub fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,notch_ui=info,notch_components=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
