//! Version-level `maven-metadata.xml` for timestamped SNAPSHOT deployment.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use mvnpub_util::errors::MvnpubError;

use crate::bundle::ArtifactBundle;
use crate::layout::{LAST_UPDATED_FORMAT, SNAPSHOT_TIMESTAMP_FORMAT};
use crate::xml::XmlDoc;

/// Version-level snapshot metadata as currently deployed.
#[derive(Debug, Clone, Default)]
pub struct SnapshotMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub timestamp: Option<String>,
    pub build_number: Option<u32>,
    pub last_updated: Option<String>,
}

impl SnapshotMetadata {
    /// Build number for the next deployment.
    pub fn next_build_number(&self) -> u32 {
        self.build_number.map_or(1, |n| n.saturating_add(1))
    }
}

/// Parse a version-level `maven-metadata.xml`.
pub fn parse_snapshot_metadata(xml: &str) -> Result<SnapshotMetadata, MvnpubError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut meta = SnapshotMetadata::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path.join(">");

                match ctx.as_str() {
                    "metadata>groupId" => meta.group_id = Some(text_buf.clone()),
                    "metadata>artifactId" => meta.artifact_id = Some(text_buf.clone()),
                    "metadata>version" => meta.version = Some(text_buf.clone()),
                    "metadata>versioning>snapshot>timestamp" => {
                        meta.timestamp = Some(text_buf.clone());
                    }
                    "metadata>versioning>snapshot>buildNumber" => {
                        meta.build_number = text_buf.trim().parse().ok();
                    }
                    "metadata>versioning>lastUpdated" => {
                        meta.last_updated = Some(text_buf.clone());
                    }
                    _ => {}
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(MvnpubError::Generic {
                    message: format!("Failed to parse snapshot metadata: {e}"),
                });
            }
            _ => {}
        }
    }

    Ok(meta)
}

/// Render the version-level metadata that makes a snapshot deployment of
/// `bundle` at `at` / `build_number` current.
pub fn render_snapshot_metadata(
    bundle: &ArtifactBundle,
    at: &DateTime<Utc>,
    build_number: u32,
) -> Result<String, MvnpubError> {
    let coords = bundle.coordinates();
    let timestamp = at.format(SNAPSHOT_TIMESTAMP_FORMAT).to_string();
    let updated = at.format(LAST_UPDATED_FORMAT).to_string();
    let value = format!("{}-{timestamp}-{build_number}", coords.version.base());

    let mut doc = XmlDoc::new()?;
    doc.open_with("metadata", &[("modelVersion", "1.1.0")])?;
    doc.text("groupId", &coords.group)?;
    doc.text("artifactId", &coords.artifact)?;
    doc.text("version", coords.version.as_str())?;
    doc.open("versioning")?;
    doc.open("snapshot")?;
    doc.text("timestamp", &timestamp)?;
    doc.text("buildNumber", &build_number.to_string())?;
    doc.close("snapshot")?;
    doc.text("lastUpdated", &updated)?;
    doc.open("snapshotVersions")?;
    for entry in bundle.entries() {
        doc.open("snapshotVersion")?;
        if let Some(classifier) = entry.classifier {
            doc.text("classifier", classifier)?;
        }
        doc.text("extension", entry.extension)?;
        doc.text("value", &value)?;
        doc.text("updated", &updated)?;
        doc.close("snapshotVersion")?;
    }
    doc.close("snapshotVersions")?;
    doc.close("versioning")?;
    doc.close("metadata")?;
    Ok(doc.finish())
}
