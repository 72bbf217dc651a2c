use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RestoreError, RestoreResult};

/// Default name of the result directory under the assets root.
pub const DEFAULT_RESULT_DIR: &str = "result";

/// Configuration for a restore run.
///
/// Can be read from a TOML file; command-line flags override file values.
///
/// ```toml
/// assets_dir = "/home/me/.minecraft/assets"
/// result_dir = "/tmp/restored"
/// manifests = ["1.8", "1.12"]
/// preserve_metadata = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestoreConfig {
    /// Directory holding `indexes/` and `objects/`.
    pub assets_dir: PathBuf,
    /// Where output sets are created. Defaults to `<assets_dir>/result`.
    pub result_dir: Option<PathBuf>,
    /// Manifests to restore. `None` means every manifest in `indexes/`.
    pub manifests: Option<Vec<String>>,
    /// Carry permission bits and modification times over to copies.
    pub preserve_metadata: bool,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("."),
            result_dir: None,
            manifests: None,
            preserve_metadata: true,
        }
    }
}

impl RestoreConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> RestoreResult<Self> {
        toml::from_str(text).map_err(|e| RestoreError::Config {
            origin: "<inline>".into(),
            reason: e.to_string(),
        })
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> RestoreResult<Self> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| RestoreError::Config {
            origin: origin.clone(),
            reason: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| RestoreError::Config {
            origin,
            reason: e.to_string(),
        })
    }

    /// The result directory after applying the default.
    pub fn effective_result_dir(&self) -> PathBuf {
        self.result_dir
            .clone()
            .unwrap_or_else(|| self.assets_dir.join(DEFAULT_RESULT_DIR))
    }
}
