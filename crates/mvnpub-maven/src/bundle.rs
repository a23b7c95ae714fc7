//! The publishable unit: primary artifact, optional sources and docs, and
//! the POM rendered from the metadata.

use std::path::{Path, PathBuf};

use mvnpub_core::version::Coordinates;
use mvnpub_util::errors::MvnpubError;

use crate::pom::{self, ArtifactMetadata};

/// What an artifact is within the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Primary,
    Sources,
    Docs,
}

impl ArtifactRole {
    /// Maven classifier for the role.
    pub fn classifier(self) -> Option<&'static str> {
        match self {
            ArtifactRole::Primary => None,
            ArtifactRole::Sources => Some("sources"),
            ArtifactRole::Docs => Some("javadoc"),
        }
    }
}

/// One built file handed over by the external build tool.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub role: ArtifactRole,
    pub extension: String,
    pub data: Vec<u8>,
    pub path: Option<PathBuf>,
}

impl Artifact {
    pub fn new(role: ArtifactRole, extension: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            role,
            extension: extension.into(),
            data,
            path: None,
        }
    }

    /// Read an artifact from disk.
    pub fn from_path(
        role: ArtifactRole,
        extension: &str,
        path: &Path,
    ) -> Result<Self, MvnpubError> {
        let data = std::fs::read(path).map_err(|e| {
            MvnpubError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        Ok(Self {
            role,
            extension: extension.to_string(),
            data,
            path: Some(path.to_path_buf()),
        })
    }
}

/// A file of the bundle as it will appear in the repository, borrowed from
/// the bundle.
#[derive(Debug, Clone, Copy)]
pub struct BundleEntry<'a> {
    pub classifier: Option<&'a str>,
    pub extension: &'a str,
    pub data: &'a [u8],
}

impl BundleEntry<'_> {
    /// `artifact-<label>[-classifier].<ext>`, where `label` is the version
    /// or a timestamped snapshot version.
    pub fn file_name(&self, artifact_id: &str, label: &str) -> String {
        match self.classifier {
            Some(c) => format!("{artifact_id}-{label}-{c}.{}", self.extension),
            None => format!("{artifact_id}-{label}.{}", self.extension),
        }
    }
}

/// Everything that gets published for one version.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    coordinates: Coordinates,
    metadata: ArtifactMetadata,
    artifacts: Vec<Artifact>,
    pom: Vec<u8>,
}

impl ArtifactBundle {
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    /// Artifacts in publishing order: primary, sources, docs.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn pom(&self) -> &[u8] {
        &self.pom
    }

    /// Every file to publish: the artifacts in order, then the POM.
    pub fn entries(&self) -> Vec<BundleEntry<'_>> {
        let mut entries: Vec<BundleEntry<'_>> = self
            .artifacts
            .iter()
            .map(|a| BundleEntry {
                classifier: a.role.classifier(),
                extension: &a.extension,
                data: &a.data,
            })
            .collect();
        entries.push(BundleEntry {
            classifier: None,
            extension: "pom",
            data: &self.pom,
        });
        entries
    }
}

/// Assemble a bundle. `primary` is required; `sources` and `docs` are
/// attached when present. The POM is rendered here with the primary
/// artifact's extension as packaging.
pub fn build(
    coordinates: Coordinates,
    metadata: ArtifactMetadata,
    primary: Option<Artifact>,
    sources: Option<Artifact>,
    docs: Option<Artifact>,
) -> Result<ArtifactBundle, MvnpubError> {
    let primary = primary.ok_or_else(|| MvnpubError::MissingPrimaryArtifact {
        artifact: coordinates.to_string(),
    })?;

    let pom = pom::render_pom(&coordinates, &metadata, &primary.extension)?;

    let mut artifacts = vec![Artifact {
        role: ArtifactRole::Primary,
        ..primary
    }];
    if let Some(s) = sources {
        artifacts.push(Artifact {
            role: ArtifactRole::Sources,
            ..s
        });
    }
    if let Some(d) = docs {
        artifacts.push(Artifact {
            role: ArtifactRole::Docs,
            ..d
        });
    }

    tracing::debug!(
        "bundle for {coordinates}: {} artifact(s) + POM",
        artifacts.len()
    );

    Ok(ArtifactBundle {
        coordinates,
        metadata,
        artifacts,
        pom: pom.into_bytes(),
    })
}
