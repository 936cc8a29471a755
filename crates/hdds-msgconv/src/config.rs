// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converter configuration.
//!
//! Supports both programmatic and file-based configuration, plus an
//! environment overlay:
//!
//! - `HDDS_MSGCONV_PACKAGE_PATH`: extra package roots (path-list syntax)
//! - `ROS_PACKAGE_PATH`: package roots, appended when `use_ros_package_path` is set
//! - `HDDS_MSGCONV_LOG_LEVEL`: log level

use crate::converter::MessageConverter;
use crate::registry::{PackagePathProvider, TypeRegistry, ENV_ROS_PACKAGE_PATH};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub const ENV_PACKAGE_PATH: &str = "HDDS_MSGCONV_PACKAGE_PATH";
pub const ENV_LOG_LEVEL: &str = "HDDS_MSGCONV_LOG_LEVEL";

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Converter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Package roots searched before `ROS_PACKAGE_PATH`.
    #[serde(default)]
    pub package_paths: Vec<PathBuf>,

    /// Also search the roots listed in `ROS_PACKAGE_PATH`.
    #[serde(default = "default_true")]
    pub use_ros_package_path: bool,

    /// Fall back to the built-in std_msgs / geometry_msgs / std_srvs types.
    #[serde(default = "default_true")]
    pub builtin_types: bool,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            package_paths: Vec::new(),
            use_ros_package_path: true,
            builtin_types: true,
            log_level: default_log_level(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay environment settings onto this configuration.
    ///
    /// Roots from `HDDS_MSGCONV_PACKAGE_PATH` are appended; an empty
    /// variable is ignored.
    pub fn apply_env(&mut self) {
        if let Some(paths) = env::var_os(ENV_PACKAGE_PATH).filter(|p| !p.is_empty()) {
            self.package_paths.extend(env::split_paths(&paths));
        }
        if let Some(level) = env::var(ENV_LOG_LEVEL).ok().filter(|s| !s.is_empty()) {
            self.log_level = level.to_lowercase();
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Unknown log level '{}' (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        for (i, path) in self.package_paths.iter().enumerate() {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!("Package path {} is empty", i)));
            }
        }

        if self.package_paths.is_empty() && !self.use_ros_package_path && !self.builtin_types {
            return Err(ConfigError::Invalid(
                "No type sources: set package_paths, use_ros_package_path or builtin_types".into(),
            ));
        }

        Ok(())
    }

    /// Add a package root.
    pub fn add_package_path(&mut self, path: impl Into<PathBuf>) {
        self.package_paths.push(path.into());
    }

    /// Package roots in search order.
    pub fn search_roots(&self) -> Vec<PathBuf> {
        let mut roots = self.package_paths.clone();
        if self.use_ros_package_path {
            if let Some(paths) = env::var_os(ENV_ROS_PACKAGE_PATH) {
                roots.extend(env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()));
            }
        }
        roots
    }

    /// Build the filesystem provider described by this configuration.
    pub fn build_provider(&self) -> PackagePathProvider {
        PackagePathProvider::new(self.search_roots()).with_builtins(self.builtin_types)
    }

    /// Build a converter with a fresh registry.
    pub fn build_converter(&self) -> Result<MessageConverter, ConfigError> {
        self.validate()?;
        let provider = self.build_provider();
        log::debug!(
            "message converter: {} package root(s), builtins {}",
            provider.roots().len(),
            if self.builtin_types { "on" } else { "off" }
        );
        let registry = TypeRegistry::new(Arc::new(provider));
        Ok(MessageConverter::new(Arc::new(registry)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert!(config.use_ros_package_path);
        assert!(config.builtin_types);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = ConverterConfig::from_toml(
            r#"
            package_paths = ["/opt/ros/share", "/ws/src"]
            use_ros_package_path = false
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.package_paths,
            [PathBuf::from("/opt/ros/share"), PathBuf::from("/ws/src")]
        );
        assert!(!config.use_ros_package_path);
        assert!(config.builtin_types);
        assert_eq!(config.search_roots(), config.package_paths);
    }

    #[test]
    fn test_validate_rejects() {
        let err = ConverterConfig::from_toml("log_level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let config = ConverterConfig {
            use_ros_package_path: false,
            builtin_types: false,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        assert!(matches!(
            ConverterConfig::from_toml("package_paths = 3"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msgconv.toml");
        std::fs::write(&path, "builtin_types = false\npackage_paths = [\"/tmp\"]\n").unwrap();
        let config = ConverterConfig::from_file(&path).unwrap();
        assert!(!config.builtin_types);

        assert!(matches!(
            ConverterConfig::from_file(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_build_converter_with_builtins() {
        let config = ConverterConfig {
            use_ros_package_path: false,
            ..Default::default()
        };
        let converter = config.build_converter().unwrap();
        assert!(converter.resolve_message_type("std_msgs/Header").is_ok());
    }
}
