//! Maven repository layout: which files a bundle turns into, and where.

use chrono::{DateTime, Utc};

use crate::bundle::ArtifactBundle;
use crate::checksum;
use crate::sign::SigningState;

/// A file ready to upload, with its path relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: String,
    pub data: Vec<u8>,
}

/// Snapshot timestamp format used in file names and `<timestamp>`.
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y%m%d.%H%M%S";

/// `lastUpdated` format in `maven-metadata.xml`.
pub const LAST_UPDATED_FORMAT: &str = "%Y%m%d%H%M%S";

/// Timestamped snapshot version: `1.0-SNAPSHOT` at build 3 becomes
/// `1.0-20260101.120000-3`.
pub fn snapshot_label(base: &str, at: &DateTime<Utc>, build_number: u32) -> String {
    format!(
        "{base}-{}-{build_number}",
        at.format(SNAPSHOT_TIMESTAMP_FORMAT)
    )
}

/// Expand `bundle` into upload files for the version directory. Every
/// entry is followed by its signature (when signed) and its checksums.
/// `label` is the version used in file names.
pub fn files(bundle: &ArtifactBundle, label: &str, signing: &SigningState) -> Vec<UploadFile> {
    let dir = bundle.coordinates().version_path();
    let artifact_id = &bundle.coordinates().artifact;
    let signatures = signing.signatures();

    let mut out = Vec::new();
    for (i, entry) in bundle.entries().iter().enumerate() {
        let name = entry.file_name(artifact_id, label);
        out.push(UploadFile {
            path: format!("{dir}/{name}"),
            data: entry.data.to_vec(),
        });
        if let Some(sig) = signatures.get(i) {
            out.push(UploadFile {
                path: format!("{dir}/{name}.asc"),
                data: sig.armored.clone(),
            });
        }
        out.extend(sidecar_files(&format!("{dir}/{name}"), entry.data));
    }
    out
}

/// `path` itself followed by its checksum sidecars.
pub fn with_checksums(path: &str, data: &[u8]) -> Vec<UploadFile> {
    let mut out = vec![UploadFile {
        path: path.to_string(),
        data: data.to_vec(),
    }];
    out.extend(sidecar_files(path, data));
    out
}

fn sidecar_files(path: &str, data: &[u8]) -> Vec<UploadFile> {
    checksum::sidecars(data)
        .into_iter()
        .map(|(ext, digest)| UploadFile {
            path: format!("{path}.{ext}"),
            data: digest.into_bytes(),
        })
        .collect()
}
