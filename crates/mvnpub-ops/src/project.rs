//! A loaded project: manifest, global configuration and the merged property
//! store every operation reads from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mvnpub_core::config::{self, GlobalConfig};
use mvnpub_core::credentials::{
    CredentialNames, CredentialResolver, DEFAULT_SIGNING_KEY_ID_KEY, DEFAULT_SIGNING_PASSWORD_KEY,
};
use mvnpub_core::manifest::Manifest;
use mvnpub_core::properties::{load_properties, merge_layers, parse_override};
use mvnpub_core::version::{ArtifactVersion, Coordinates};
use mvnpub_core::{MANIFEST_FILE, PROPERTIES_FILE};
use mvnpub_util::errors::MvnpubError;
use mvnpub_util::fs::find_ancestor_with;

pub struct Project {
    pub root: PathBuf,
    pub manifest: Manifest,
    pub global: GlobalConfig,
    /// `-P` overrides, then project properties, then user properties.
    pub properties: BTreeMap<String, String>,
}

impl Project {
    /// Find the directory holding `Publish.toml`, starting at `cwd`.
    pub fn discover(cwd: &Path) -> miette::Result<PathBuf> {
        find_ancestor_with(cwd, MANIFEST_FILE).ok_or_else(|| {
            MvnpubError::Manifest {
                message: format!("Could not find {MANIFEST_FILE} in this directory or any parent"),
            }
            .into()
        })
    }

    /// Load the project at `root` with `~/.mvnpub` as the user directory.
    pub fn load(root: &Path, overrides: &[String]) -> miette::Result<Self> {
        Self::load_in(root, overrides, &config::dirs_path())
    }

    /// Load the project at `root`, reading user-level files from `user_dir`.
    pub fn load_in(root: &Path, overrides: &[String], user_dir: &Path) -> miette::Result<Self> {
        let manifest = Manifest::from_path(&root.join(MANIFEST_FILE))?;
        let global = GlobalConfig::load_from(&user_dir.join("config.toml"))?;

        let mut cli = BTreeMap::new();
        for raw in overrides {
            let (key, value) = parse_override(raw).ok_or_else(|| MvnpubError::Generic {
                message: format!("Invalid property override '{raw}' (expected key=value)"),
            })?;
            cli.insert(key, value);
        }

        let properties = merge_layers(vec![
            cli,
            load_properties(&root.join(PROPERTIES_FILE))?,
            load_properties(&user_dir.join(PROPERTIES_FILE))?,
        ]);
        tracing::debug!("{} properties loaded for {}", properties.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            manifest,
            global,
            properties,
        })
    }

    /// Resolver over the merged property store and the process environment.
    pub fn resolver(&self) -> CredentialResolver {
        CredentialResolver::new(self.properties.clone())
    }

    /// Coordinates for `version`, falling back to `[coordinates] version`.
    pub fn coordinates(&self, version: Option<&str>) -> Result<Coordinates, MvnpubError> {
        let coords = &self.manifest.coordinates;
        let raw = version
            .or(coords.version.as_deref())
            .ok_or_else(|| MvnpubError::InvalidVersion {
                version: String::new(),
                reason: "no version given and [coordinates] version is not set".to_string(),
            })?;
        Coordinates::new(&coords.group, &coords.artifact, ArtifactVersion::parse(raw)?)
    }

    /// Credential property names: CLI keys, then `[credentials]`, then the
    /// portal defaults.
    pub fn credential_names(
        &self,
        username_key: Option<&str>,
        password_key: Option<&str>,
    ) -> CredentialNames {
        let defaults = CredentialNames::default();
        let configured = &self.manifest.credentials;
        CredentialNames {
            username: username_key
                .map(str::to_string)
                .or_else(|| configured.username.clone())
                .unwrap_or(defaults.username),
            password: password_key
                .map(str::to_string)
                .or_else(|| configured.password.clone())
                .unwrap_or(defaults.password),
        }
    }

    /// Property names holding the signing key id and passphrase.
    pub fn signing_names(&self) -> (String, String) {
        let signing = &self.manifest.signing;
        (
            signing
                .key_id
                .clone()
                .unwrap_or_else(|| DEFAULT_SIGNING_KEY_ID_KEY.to_string()),
            signing
                .password
                .clone()
                .unwrap_or_else(|| DEFAULT_SIGNING_PASSWORD_KEY.to_string()),
        )
    }

    /// GPG executable: `[signing] program`, then the global default.
    pub fn signing_program(&self) -> String {
        self.manifest
            .signing
            .program
            .clone()
            .unwrap_or_else(|| self.global.signing.program.clone())
    }
}
