//! Destination repositories and version-based routing.

use mvnpub_core::version::{ArtifactVersion, VersionKind};

/// Central Portal snapshot repository (Maven PUT layout).
pub const CENTRAL_SNAPSHOTS_URL: &str = "https://central.sonatype.com/repository/maven-snapshots";

/// Central Portal bundle upload endpoint (staging deployments).
pub const CENTRAL_PORTAL_UPLOAD_URL: &str = "https://central.sonatype.com/api/v1/publisher/upload";

/// The two well-known destinations a version can be routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub snapshot: String,
    pub release: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            snapshot: CENTRAL_SNAPSHOTS_URL.to_string(),
            release: CENTRAL_PORTAL_UPLOAD_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Defaults with optional overrides from `[repositories]`.
    pub fn with_overrides(snapshot: Option<&str>, release: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            snapshot: snapshot
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.snapshot),
            release: release
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.release),
        }
    }
}

/// The repository selected for one publish operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub kind: VersionKind,
    pub url: String,
    pub requires_auth: bool,
}

/// Pick the destination for `version`. Snapshot versions go to the snapshot
/// repository, everything else to the release (staging) endpoint.
pub fn route(version: &ArtifactVersion, endpoints: &Endpoints) -> RepositoryTarget {
    let kind = version.kind();
    let url = match kind {
        VersionKind::Snapshot => &endpoints.snapshot,
        VersionKind::Release => &endpoints.release,
    };
    RepositoryTarget {
        kind,
        url: url.trim_end_matches('/').to_string(),
        requires_auth: true,
    }
}
