use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "RETRO";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime knobs. Defaults, then `RETRO_*` environment variables, then CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub selector_timeout_secs: u64,
    pub headless: bool,
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
}

/// Values given on the command line; `None` leaves the layered value alone.
#[derive(Debug, Default)]
pub struct Overrides {
    pub selector_timeout_secs: Option<u64>,
    pub headed: bool,
    pub chrome_path: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("selector_timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("headless", true)?
            .add_source(env.try_parsing(true))
            .build()
            .context("Failed to read RETRO_* settings")?
            .try_deserialize()
            .context("Invalid RETRO_* settings")
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(secs) = overrides.selector_timeout_secs {
            self.selector_timeout_secs = secs;
        }
        if overrides.headed {
            self.headless = false;
        }
        if overrides.chrome_path.is_some() {
            self.chrome_path = overrides.chrome_path;
        }
        if overrides.out_dir.is_some() {
            self.out_dir = overrides.out_dir;
        }
        self
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_timeout_secs)
    }

    /// Where the export lands: the configured directory or the working directory,
    /// made absolute either way.
    pub fn resolve_out_dir(&self) -> Result<PathBuf> {
        let dir = match &self.out_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        std::path::absolute(&dir)
            .with_context(|| format!("Failed to resolve output directory {}", dir.display()))
    }
}
