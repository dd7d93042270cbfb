//! Configuration file support for verinfo.
//!
//! verinfo supports two configuration file locations:
//! - Global: `~/.verinfo/config.toml` - User-wide defaults
//! - Project: `.verinfo/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::request::GenerationRequest;
use crate::util::fs::RetryPolicy;

/// verinfo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation defaults
    pub generate: GenerateConfig,

    /// Output file settings
    pub write: WriteConfig,
}

/// Defaults applied to every generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerateConfig {
    /// Default target language (any accepted alias)
    pub language: Option<String>,

    /// Namespace override for the constants class
    pub namespace: Option<String>,

    /// Emit title/product/company/copyright attributes
    pub emit_non_version_attributes: Option<bool>,

    /// Emit the `ThisAssembly` class
    pub emit_this_assembly_class: Option<bool>,
}

/// Output file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WriteConfig {
    /// Attempts before giving up on a locked output file
    pub retry_attempts: Option<u32>,

    /// Milliseconds between attempts
    pub retry_delay_ms: Option<u64>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.generate.language.is_some() {
            self.generate.language = other.generate.language;
        }
        if other.generate.namespace.is_some() {
            self.generate.namespace = other.generate.namespace;
        }
        if other.generate.emit_non_version_attributes.is_some() {
            self.generate.emit_non_version_attributes = other.generate.emit_non_version_attributes;
        }
        if other.generate.emit_this_assembly_class.is_some() {
            self.generate.emit_this_assembly_class = other.generate.emit_this_assembly_class;
        }

        if other.write.retry_attempts.is_some() {
            self.write.retry_attempts = other.write.retry_attempts;
        }
        if other.write.retry_delay_ms.is_some() {
            self.write.retry_delay_ms = other.write.retry_delay_ms;
        }
    }

    /// Fill request settings the caller left unset.
    ///
    /// An empty language or namespace on the request counts as unset. The
    /// boolean switches can only be moved away from their defaults, so an
    /// explicit request value is never reverted.
    pub fn apply_to(&self, request: &mut GenerationRequest) {
        if request.language.trim().is_empty() {
            if let Some(ref language) = self.generate.language {
                request.language = language.clone();
            }
        }
        if request.namespace.as_deref().map_or(true, str::is_empty) {
            if let Some(ref namespace) = self.generate.namespace {
                request.namespace = Some(namespace.clone());
            }
        }
        if let Some(emit) = self.generate.emit_non_version_attributes {
            request.emit_non_version_attributes |= emit;
        }
        if let Some(emit) = self.generate.emit_this_assembly_class {
            request.emit_this_assembly_class &= emit;
        }
    }

    /// Retry policy for writing the generated file.
    pub fn retry_policy(&self) -> RetryPolicy {
        let default = RetryPolicy::default();
        RetryPolicy {
            attempts: self.write.retry_attempts.unwrap_or(default.attempts),
            delay_ms: self.write.retry_delay_ms.unwrap_or(default.delay_ms),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.verinfo/config.toml)
/// 2. Global config (~/.verinfo/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global verinfo config directory (~/.verinfo).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".verinfo"))
}

/// Get the global config path (~/.verinfo/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.verinfo/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".verinfo").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.generate.language.is_none());
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[generate]
language = "vb"
namespace = "Acme.Build"
emit-non-version-attributes = true

[write]
retry-attempts = 3
retry-delay-ms = 50
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.generate.language.as_deref(), Some("vb"));
        assert_eq!(config.generate.namespace.as_deref(), Some("Acme.Build"));
        assert_eq!(config.generate.emit_non_version_attributes, Some(true));
        assert_eq!(
            config.retry_policy(),
            RetryPolicy {
                attempts: 3,
                delay_ms: 50
            }
        );
    }

    #[test]
    fn test_config_load_invalid_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[generate\nlanguage =").unwrap();

        assert!(Config::load(&config_path).is_err());
        let config = Config::load_or_default(&config_path);
        assert!(config.generate.language.is_none());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.generate.language = Some("cs".to_string());
        base.write.retry_attempts = Some(4);

        let mut override_cfg = Config::default();
        override_cfg.generate.language = Some("fs".to_string());

        base.merge(override_cfg);

        assert_eq!(base.generate.language.as_deref(), Some("fs"));
        assert_eq!(base.write.retry_attempts, Some(4));
    }

    #[test]
    fn test_load_config_project_wins() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();

        std::fs::write(&global, "[generate]\nlanguage = \"cs\"\nnamespace = \"G\"\n").unwrap();
        std::fs::write(&project, "[generate]\nlanguage = \"vb\"\n").unwrap();

        let config = load_config(&global, &project);
        assert_eq!(config.generate.language.as_deref(), Some("vb"));
        assert_eq!(config.generate.namespace.as_deref(), Some("G"));
    }

    #[test]
    fn test_apply_to_keeps_explicit_values() {
        let mut config = Config::default();
        config.generate.language = Some("vb".to_string());
        config.generate.namespace = Some("FromConfig".to_string());
        config.generate.emit_this_assembly_class = Some(false);

        let mut request = GenerationRequest::new("cs");
        config.apply_to(&mut request);
        assert_eq!(request.language, "cs");
        assert_eq!(request.namespace.as_deref(), Some("FromConfig"));
        assert!(!request.emit_this_assembly_class);

        let mut request = GenerationRequest::new("");
        config.apply_to(&mut request);
        assert_eq!(request.language, "vb");
    }
}
