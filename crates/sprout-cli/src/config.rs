//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SPROUT_` prefix, `__` between sections, e.g.
//!    `SPROUT_TOOLS__PACKAGE_MANAGER=pnpm`
//! 3. Config file: `--config FILE` (must exist) or the platform config dir
//!    (optional)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use sprout_adapters::PackageManagerKind;
use sprout_core::domain::entities::blueprint::DEFAULT_TEMPLATE_URL;

const ENV_PREFIX: &str = "SPROUT";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub template: TemplateConfig,
    pub tools: ToolsConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Repository cloned into every new project.
    pub url: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TEMPLATE_URL.into(),
        }
    }
}

/// External programs sprout drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub git: String,
    pub package_manager: PackageManagerKind,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: "git".into(),
            package_manager: PackageManagerKind::Npm,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write JSON logs to this file.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.  Without
    /// it the default location is read if present.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration value")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.sprout.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "sprout", "sprout")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".sprout.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.template.url, DEFAULT_TEMPLATE_URL);
        assert_eq!(cfg.tools.git, "git");
        assert_eq!(cfg.tools.package_manager, PackageManagerKind::Npm);
        assert!(!cfg.output.no_color);
        assert!(cfg.logging.file.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("sprout.toml");
        std::fs::write(
            &path,
            "[template]\nurl = \"https://example.com/starter.git\"\n\n\
             [tools]\npackage_manager = \"pnpm\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.template.url, "https://example.com/starter.git");
        assert_eq!(cfg.tools.package_manager, PackageManagerKind::Pnpm);
        assert_eq!(cfg.tools.git, "git");
    }

    #[test]
    fn explicit_file_must_exist() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&tmp.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn unknown_package_manager_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("sprout.toml");
        std::fs::write(&path, "[tools]\npackage_manager = \"cargo\"\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
