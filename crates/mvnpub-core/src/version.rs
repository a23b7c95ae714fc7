//! Artifact versions and Maven coordinates.

use std::fmt;

use mvnpub_util::errors::MvnpubError;

/// Reserved suffix marking a pre-release (snapshot) version.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Whether a version is a mutable pre-release or an immutable release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    Snapshot,
    Release,
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionKind::Snapshot => write!(f, "snapshot"),
            VersionKind::Release => write!(f, "release"),
        }
    }
}

/// A version identifier fixed at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactVersion(String);

impl ArtifactVersion {
    /// Parse a version string. Surrounding whitespace is trimmed; empty
    /// versions and versions containing whitespace or `/` are rejected since
    /// they cannot form a repository path.
    pub fn parse(input: &str) -> Result<Self, MvnpubError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MvnpubError::InvalidVersion {
                version: input.to_string(),
                reason: "version is empty".to_string(),
            });
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
            return Err(MvnpubError::InvalidVersion {
                version: input.to_string(),
                reason: "version must not contain whitespace or path separators".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Snapshot iff the version ends with [`SNAPSHOT_SUFFIX`] and has
    /// something in front of it. A bare `-SNAPSHOT` is a release.
    pub fn kind(&self) -> VersionKind {
        if self.0.len() > SNAPSHOT_SUFFIX.len() && self.0.ends_with(SNAPSHOT_SUFFIX) {
            VersionKind::Snapshot
        } else {
            VersionKind::Release
        }
    }

    pub fn is_snapshot(&self) -> bool {
        self.kind() == VersionKind::Snapshot
    }

    /// The version without the snapshot suffix (`1.0-SNAPSHOT` -> `1.0`).
    /// Release versions are returned unchanged.
    pub fn base(&self) -> &str {
        match self.kind() {
            VersionKind::Snapshot => &self.0[..self.0.len() - SNAPSHOT_SUFFIX.len()],
            VersionKind::Release => &self.0,
        }
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maven coordinates of the artifact being published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub group: String,
    pub artifact: String,
    pub version: ArtifactVersion,
}

impl Coordinates {
    /// Build coordinates, rejecting group or artifact ids that are empty or
    /// would not map to a single repository directory.
    pub fn new(group: &str, artifact: &str, version: ArtifactVersion) -> Result<Self, MvnpubError> {
        let group = group.trim();
        let artifact = artifact.trim();
        if group.is_empty() {
            return Err(MvnpubError::MissingMetadataField {
                field: "coordinates.group".to_string(),
            });
        }
        if artifact.is_empty() {
            return Err(MvnpubError::MissingMetadataField {
                field: "coordinates.artifact".to_string(),
            });
        }
        check_id("group", group)?;
        if group.split('.').any(str::is_empty) {
            return Err(invalid("group", group, "group segments must not be empty"));
        }
        check_id("artifact", artifact)?;
        if artifact.chars().all(|c| c == '.') {
            return Err(invalid("artifact", artifact, "artifact must not be only dots"));
        }
        Ok(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version,
        })
    }

    /// Directory of this version in the standard Maven layout.
    ///
    /// `ai.protify:protify-core:0.1.1` becomes `ai/protify/protify-core/0.1.1`
    pub fn version_path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.version
        )
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

fn check_id(field: &str, value: &str) -> Result<(), MvnpubError> {
    match value
        .chars()
        .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        Some(c) => Err(invalid(field, value, &format!("character '{c}' is not allowed"))),
        None => Ok(()),
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> MvnpubError {
    MvnpubError::InvalidCoordinates {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
