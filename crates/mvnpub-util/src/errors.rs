use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all mvnpub operations.
#[derive(Debug, Error, Diagnostic)]
pub enum MvnpubError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Publish.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Publish.toml for syntax errors"))]
    Manifest { message: String },

    /// The version string cannot be used as a Maven version.
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// A group or artifact id that cannot form a repository path.
    #[error("Invalid {field} '{value}': {reason}")]
    #[diagnostic(help("Maven ids use letters, digits, '_', '-' and '.' only"))]
    InvalidCoordinates {
        field: String,
        value: String,
        reason: String,
    },

    /// A required POM metadata field is absent or empty.
    #[error("Missing metadata field: {field}")]
    #[diagnostic(help(
        "Every published artifact needs a complete [metadata] section in Publish.toml"
    ))]
    MissingMetadataField { field: String },

    /// The bundle has no primary artifact.
    #[error("Missing primary artifact for {artifact}")]
    #[diagnostic(help("Build the library first, or point [artifacts] primary at the JAR"))]
    MissingPrimaryArtifact { artifact: String },

    /// The destination requires credentials and none were resolved.
    #[error("Missing credential: {name} (required by {target})")]
    #[diagnostic(help(
        "Set it in publish.properties, ~/.mvnpub/publish.properties, with -P, or as an environment variable"
    ))]
    MissingCredential { name: String, target: String },

    /// The signing capability is unavailable or rejected a file.
    #[error("Signing failed for {file}: {reason}")]
    SigningFailed { file: String, reason: String },

    /// Transport error or server-side rejection during upload.
    #[error("Upload to {url} failed: {cause}")]
    UploadFailed { url: String, cause: String },

    /// A bounded operation did not complete in time.
    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: String, seconds: u64 },

    /// An external process could not be spawned or driven.
    #[error("Process error: {message}")]
    Process { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl MvnpubError {
    /// Whether the error was raised before any network traffic was attempted.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Manifest { .. }
                | Self::InvalidVersion { .. }
                | Self::InvalidCoordinates { .. }
                | Self::MissingMetadataField { .. }
                | Self::MissingPrimaryArtifact { .. }
                | Self::MissingCredential { .. }
                | Self::SigningFailed { .. }
        )
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type MvnpubResult<T> = miette::Result<T>;
