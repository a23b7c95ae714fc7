//! Central Publisher Portal bundles.
//!
//! A release is uploaded as one ZIP in Maven directory layout. The portal
//! validates it as a single staging deployment, so either all of its files
//! become a deployment or none do.

use std::io::{Cursor, Write};

use mvnpub_core::version::Coordinates;
use mvnpub_util::errors::MvnpubError;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::layout::UploadFile;

/// File name of the uploaded bundle part.
pub const BUNDLE_FILE_NAME: &str = "bundle.zip";

/// Whether the portal publishes the deployment once validated, or waits for
/// a manual release from the portal UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishingType {
    #[default]
    UserManaged,
    Automatic,
}

impl PublishingType {
    /// Parse `user-managed` / `automatic` (case-insensitive, `_` allowed).
    pub fn parse(input: &str) -> Result<Self, MvnpubError> {
        match input.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "user-managed" => Ok(Self::UserManaged),
            "automatic" => Ok(Self::Automatic),
            other => Err(MvnpubError::Manifest {
                message: format!(
                    "unknown publishing-type '{other}' (expected 'user-managed' or 'automatic')"
                ),
            }),
        }
    }

    /// Value of the `publishingType` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            Self::UserManaged => "USER_MANAGED",
            Self::Automatic => "AUTOMATIC",
        }
    }
}

/// Upload URL for a deployment of `coords`.
pub fn upload_url(
    base: &str,
    coords: &Coordinates,
    publishing_type: PublishingType,
) -> Result<String, MvnpubError> {
    let url = reqwest::Url::parse_with_params(
        base,
        &[
            ("name", coords.to_string()),
            ("publishingType", publishing_type.as_query().to_string()),
        ],
    )
    .map_err(|e| MvnpubError::Manifest {
        message: format!("invalid release repository URL '{base}': {e}"),
    })?;
    Ok(url.to_string())
}

/// Pack `files` into a ZIP, preserving their order.
pub fn zip_bundle(files: &[UploadFile]) -> Result<Vec<u8>, MvnpubError> {
    let zip_err = |e: zip::result::ZipError| MvnpubError::Generic {
        message: format!("Failed to build portal bundle: {e}"),
    };

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for file in files {
        zip.start_file(file.path.as_str(), options).map_err(zip_err)?;
        zip.write_all(&file.data)?;
    }
    let cursor = zip.finish().map_err(zip_err)?;
    Ok(cursor.into_inner())
}
