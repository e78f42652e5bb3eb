//! Optional per-project defaults read from `.texproj.toml`
//!
//! ```toml
//! [flat]
//! output = "build/flat.tex"
//!
//! [find_unused]
//! exclude_dirs = ["build", "drafts"]
//! exclude_extensions = ["sty", ".bst"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use texproj_core::{TexError, normalize_extension};
use tracing::debug;

/// File name looked up next to the root document.
pub const CONFIG_FILE: &str = ".texproj.toml";

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub flat: FlatConfig,
    pub find_unused: UnusedConfig,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FlatConfig {
    pub output: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UnusedConfig {
    pub exclude_dirs: Vec<String>,
    pub exclude_extensions: Vec<String>,
}

impl ProjectConfig {
    /// Load the config that sits in `project_dir`; a missing file yields defaults.
    pub fn load(project_dir: &Path) -> Result<Self, TexError> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|e| TexError::io(&path, e))?;
        let config = Self::parse(&text).map_err(|e| TexError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        debug!(target: "texproj::config", "Loaded project config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Exclusion filters applied by the unused-file finder.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FinderOptions {
    /// Directories relative to the project root whose files are never reported.
    pub exclude_dirs: Vec<String>,
    /// Extensions (with a leading dot) whose files are never candidates.
    pub exclude_extensions: Vec<String>,
}

impl FinderOptions {
    pub fn new<D, E>(exclude_dirs: D, exclude_extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            exclude_dirs: exclude_dirs
                .into_iter()
                .map(|d| d.as_ref().trim().to_string())
                .filter(|d| !d.is_empty())
                .collect(),
            exclude_extensions: exclude_extensions
                .into_iter()
                .filter_map(|e| normalize_extension(e.as_ref()))
                .collect(),
        }
    }

    /// Build from the comma-separated form used on the command line.
    pub fn from_comma_lists(exclude_dirs: &str, exclude_extensions: &str) -> Self {
        Self::new(split_list(exclude_dirs), split_list(exclude_extensions))
    }

    /// Fill empty lists from the project config; explicit values win.
    pub fn or_config(self, config: &UnusedConfig) -> Self {
        let defaults = Self::new(&config.exclude_dirs, &config.exclude_extensions);
        Self {
            exclude_dirs: if self.exclude_dirs.is_empty() {
                defaults.exclude_dirs
            } else {
                self.exclude_dirs
            },
            exclude_extensions: if self.exclude_extensions.is_empty() {
                defaults.exclude_extensions
            } else {
                self.exclude_extensions
            },
        }
    }
}

/// Split a comma-separated list, dropping blank entries.
pub fn split_list(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}
