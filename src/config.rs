//! Configuration for locating score files.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default directory holding precomputed score files.
pub const DEFAULT_CRITERION_ROOT: &str = "./drop_utils/resource";

/// Settings shared by the selector and the applier.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DropConfig {
    /// Directory searched for `{dataset}_{indicator}.json`.
    pub criterion_root: PathBuf,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            criterion_root: PathBuf::from(DEFAULT_CRITERION_ROOT),
        }
    }
}

impl DropConfig {
    /// Replaces the score file directory.
    pub fn with_criterion_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.criterion_root = root.into();
        self
    }

    /// Score file directory.
    pub fn criterion_root(&self) -> &Path {
        &self.criterion_root
    }

    /// Parses a JSON object; missing fields take their defaults.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
