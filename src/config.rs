//! Configuration for dslint (`dslint.yaml`).

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::annotations::{AnnotationNames, DEFAULT_PACKAGE};
use crate::detect::Severity;

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["dslint.yaml", ".dslint.yaml"];

/// Fact documents picked up when scanning a directory.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.dslint.yaml", "**/*.dslint.yml", "**/*.dslint.json"];

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}: {}", .path.display(), .source)]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("annotation_package must not be empty")]
    EmptyPackage,
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Package of the annotation library (default: `com.hananrh.dslint.annotations`).
    #[serde(default)]
    pub annotation_package: Option<String>,
    /// Severity override for reported issues.
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Issue ids that are not reported.
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Glob patterns for lambda source files to skip (e.g., "**/generated/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Glob patterns selecting fact documents when scanning a directory.
    #[serde(default)]
    pub include: Vec<String>,
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Look for a default configuration file in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Check that every pattern compiles and the package is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .annotation_package
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            return Err(ConfigError::EmptyPackage);
        }
        self.excluded_matcher()?;
        self.include_matcher()?;
        Ok(())
    }

    /// Returns the annotation package (defaults to [`DEFAULT_PACKAGE`]).
    pub fn annotation_package(&self) -> &str {
        self.annotation_package.as_deref().unwrap_or(DEFAULT_PACKAGE)
    }

    pub fn annotation_names(&self) -> AnnotationNames {
        AnnotationNames::new(self.annotation_package())
    }

    pub fn is_disabled(&self, issue_id: &str) -> bool {
        self.disabled.iter().any(|d| d == issue_id)
    }

    /// Matcher for `excluded_paths`.
    pub fn excluded_matcher(&self) -> Result<GlobSet, ConfigError> {
        build_globset(self.excluded_paths.iter().map(String::as_str))
    }

    /// Matcher for `include`, falling back to [`DEFAULT_INCLUDE`].
    pub fn include_matcher(&self) -> Result<GlobSet, ConfigError> {
        if self.include.is_empty() {
            build_globset(DEFAULT_INCLUDE.iter().copied())
        } else {
            build_globset(self.include.iter().map(String::as_str))
        }
    }
}

fn build_globset<'a>(patterns: impl Iterator<Item = &'a str>) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::InvalidGlob {
        pattern: String::new(),
        source,
    })
}
