use crate::autostart;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tessera_config::{Config, WindowManagerConfig};
use tracing::{error, info, warn};

/// Where the configuration file comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// ~/.config/tessera/config.toml, defaults if absent
    Default,
    Path(PathBuf),
}

impl ConfigSource {
    pub fn load(&self) -> Result<Config> {
        match self {
            ConfigSource::Default => Config::load(),
            ConfigSource::Path(path) => Config::load_from_path(path),
        }
    }

    /// Write the default configuration here if no file exists yet
    pub fn init(&self) -> Result<()> {
        match self {
            ConfigSource::Default => Config::create_default_if_missing(),
            ConfigSource::Path(path) => Config::create_default_at(path).map(|_| ()),
        }
    }
}

/// Holds the configuration currently handed to the host.
///
/// A reload that fails leaves the current configuration in place.
pub struct Session {
    source: ConfigSource,

    /// Theme chosen on the command line, wins over the file
    theme_override: Option<String>,

    current: Option<WindowManagerConfig>,

    /// Number of successful loads so far
    generation: u64,

    autostarted: bool,
}

impl Session {
    pub fn new(source: ConfigSource, theme_override: Option<String>) -> Self {
        Self {
            source,
            theme_override,
            current: None,
            generation: 0,
            autostarted: false,
        }
    }

    /// Read the source and assemble, without touching session state
    pub fn build(&self) -> Result<WindowManagerConfig> {
        let mut config = self.source.load()?;

        if let Some(theme) = &self.theme_override {
            config.theme.name = theme.clone();
        }

        config.assemble()
    }

    /// First load. Failure here is fatal since there is nothing to fall
    /// back to.
    pub fn start(&mut self) -> Result<&WindowManagerConfig> {
        let config = self.build().context("Initial configuration load failed")?;
        info!("Session started with theme '{}'", config.theme);
        self.install(config);
        self.run_autostart();
        self.current().context("No configuration installed")
    }

    /// Rebuild the configuration. Returns whether the new one was installed.
    pub fn reload(&mut self) -> bool {
        info!("Reloading configuration...");

        match self.build() {
            Ok(config) => {
                self.install(config);
                info!("Configuration reloaded successfully (generation {})", self.generation);
                true
            }
            Err(e) => {
                error!("Failed to reload config, keeping previous: {:#}", e);
                false
            }
        }
    }

    pub fn current(&self) -> Option<&WindowManagerConfig> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn install(&mut self, config: WindowManagerConfig) {
        self.current = Some(config);
        self.generation += 1;
    }

    /// Run the autostart script the first time only
    fn run_autostart(&mut self) {
        if self.autostarted {
            return;
        }
        self.autostarted = true;

        let Some(path) = self.current.as_ref().and_then(|c| c.autostart.clone()) else {
            return;
        };

        if let Err(e) = autostart::run(&path) {
            warn!("Autostart failed: {:#}", e);
        }
    }
}
