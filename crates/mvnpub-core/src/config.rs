use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default bound on signing and upload, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Global user configuration loaded from `~/.mvnpub/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub publish: PublishDefaults,

    #[serde(default)]
    pub signing: SigningDefaults,
}

/// Publishing defaults from `[publish]` in global config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishDefaults {
    #[serde(default = "default_timeout_secs", rename = "timeout-secs")]
    pub timeout_secs: u64,
    #[serde(default, rename = "publishing-type")]
    pub publishing_type: Option<String>,
}

impl Default for PublishDefaults {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            publishing_type: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Signing defaults from `[signing]` in global config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningDefaults {
    #[serde(default = "default_gpg_program")]
    pub program: String,
}

impl Default for SigningDefaults {
    fn default() -> Self {
        Self {
            program: default_gpg_program(),
        }
    }
}

fn default_gpg_program() -> String {
    "gpg".to_string()
}

impl GlobalConfig {
    /// Load the global configuration from `path`, or defaults if the file
    /// does not exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if path.is_file() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                mvnpub_util::errors::MvnpubError::Generic {
                    message: format!("Failed to read global config: {e}"),
                }
            })?;
            toml::from_str(&content).map_err(|e| {
                mvnpub_util::errors::MvnpubError::Generic {
                    message: format!("Failed to parse global config: {e}"),
                }
                .into()
            })
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the path to the mvnpub data directory (`~/.mvnpub/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".mvnpub")
}
