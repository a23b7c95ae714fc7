use serde::{Deserialize, Serialize};
use std::path::Path;

/// The parsed representation of a `Publish.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub coordinates: CoordinatesConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub repositories: RepositoriesConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub signing: SigningConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

/// Maven coordinates from `[coordinates]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatesConfig {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub artifact: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// POM metadata from `[metadata]`. Every field is optional here; the
/// metadata assembler decides what is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub license: Option<LicenseConfig>,
    #[serde(default)]
    pub developers: Vec<DeveloperConfig>,
    #[serde(default)]
    pub scm: Option<ScmConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeveloperConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScmConfig {
    #[serde(default)]
    pub connection: Option<String>,
    #[serde(default, rename = "developer-connection")]
    pub developer_connection: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Built artifact locations from `[artifacts]`, relative to the manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub sources: Option<String>,
    #[serde(default)]
    pub docs: Option<String>,
    /// Extension of the primary artifact (`jar` unless set).
    #[serde(default)]
    pub extension: Option<String>,
}

/// Repository endpoint overrides from `[repositories]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoriesConfig {
    #[serde(default)]
    pub snapshot: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
}

/// Credential property names from `[credentials]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Artifact signing configuration from `[signing]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SigningConfig {
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Property name holding the GPG key id.
    #[serde(default, rename = "key-id")]
    pub key_id: Option<String>,
    /// Property name holding the GPG key passphrase.
    #[serde(default)]
    pub password: Option<String>,
    /// GPG executable.
    #[serde(default)]
    pub program: Option<String>,
}

/// Upload behaviour from `[publish]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default, rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
    #[serde(default, rename = "publishing-type")]
    pub publishing_type: Option<String>,
}

impl Manifest {
    /// Load and parse a `Publish.toml` file from the given path.
    ///
    /// Before parsing, `${env:VAR}` references in the manifest content are
    /// resolved using `publish.properties` (if present alongside
    /// `Publish.toml`) and process environment variables.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            mvnpub_util::errors::MvnpubError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let props = crate::properties::load_properties(&dir.join(crate::PROPERTIES_FILE))
            .unwrap_or_default();
        let resolved = crate::properties::interpolate(&content, &props);

        Self::parse(&resolved)
    }

    /// Parse a `Publish.toml` from a string (no interpolation).
    pub fn parse(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            mvnpub_util::errors::MvnpubError::Manifest {
                message: format!("Failed to parse Publish.toml: {e}"),
            }
            .into()
        })
    }
}

/// Template written by `mvnpub init`.
pub fn template(group: &str, artifact: &str) -> String {
    format!(
        r#"[coordinates]
group = "{group}"
artifact = "{artifact}"
version = "0.1.0-SNAPSHOT"

[metadata]
name = "{artifact}"
description = ""
url = ""
license = {{ name = "Apache-2.0", url = "https://www.apache.org/licenses/LICENSE-2.0" }}
developers = [{{ id = "", name = "", email = "" }}]
scm = {{ connection = "", developer-connection = "", url = "" }}

[artifacts]
primary = "build/libs/{artifact}.jar"
sources = "build/libs/{artifact}-sources.jar"
docs = "build/libs/{artifact}-javadoc.jar"

[signing]
enabled = true
"#
    )
}
