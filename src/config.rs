//! Cookbook configuration
//!
//! Settings are layered, later sources winning:
//! built-in defaults, `$XDG_CONFIG_HOME/cookbook/config.toml`, then an
//! explicit file passed with `--config` or `COOKBOOK_CONFIG`. Command-line
//! flags are applied on top by the binary.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [resolve]
//! max_expansions = 1000000
//! ```

use crate::resolve::{DEFAULT_MAX_EXPANSIONS, Resolver};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    pub max_expansions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl Config {
    /// Load the user config file (if any) and then `explicit` (if given).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut toml = ConfigToml::default();

        if let Some(path) = user_config_path()
            && path.is_file()
        {
            toml.merge(ConfigToml::read(&path)?);
        }

        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            toml.merge(ConfigToml::read(path)?);
        }

        toml.resolve()
    }

    /// Parse a config from TOML text, on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let toml: ConfigToml = toml::from_str(content).context("Failed to parse config")?;
        toml.resolve()
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.max_expansions)
    }
}

/// `$XDG_CONFIG_HOME/cookbook/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cookbook").join("config.toml"))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    server: Option<ServerToml>,
    resolve: Option<ResolveToml>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ServerToml {
    bind: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ResolveToml {
    max_expansions: Option<usize>,
}

impl ConfigToml {
    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    fn merge(&mut self, other: ConfigToml) {
        match (self.server.as_mut(), other.server) {
            (Some(dst), Some(src)) => {
                if src.bind.is_some() {
                    dst.bind = src.bind;
                }
            }
            (None, Some(src)) => self.server = Some(src),
            _ => {}
        }
        match (self.resolve.as_mut(), other.resolve) {
            (Some(dst), Some(src)) => {
                if src.max_expansions.is_some() {
                    dst.max_expansions = src.max_expansions;
                }
            }
            (None, Some(src)) => self.resolve = Some(src),
            _ => {}
        }
    }

    fn resolve(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(bind) = self.server.and_then(|s| s.bind) {
            config.bind = bind
                .parse()
                .with_context(|| format!("Invalid server.bind address: {}", bind))?;
        }

        if let Some(max) = self.resolve.and_then(|r| r.max_expansions) {
            if max == 0 {
                bail!("resolve.max_expansions must be at least 1");
            }
            config.max_expansions = max;
        }

        Ok(config)
    }
}
