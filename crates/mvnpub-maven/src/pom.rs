//! POM metadata: structural validation of `[metadata]` and the Maven 4.0.0
//! document emitted next to the artifacts.

use mvnpub_core::manifest::MetadataConfig;
use mvnpub_core::version::Coordinates;
use mvnpub_util::errors::MvnpubError;

use crate::xml::XmlDoc;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd";

/// Validated, immutable descriptive metadata for a published artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMetadata {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub license: License,
    pub developers: Vec<Developer>,
    pub scm: Scm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Developer {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scm {
    pub connection: String,
    pub developer_connection: String,
    pub url: String,
}

/// Validate `config` and build [`ArtifactMetadata`].
///
/// Fields are checked in document order and the first absent or blank one
/// is reported as `MissingMetadataField`.
pub fn assemble(config: &MetadataConfig) -> Result<ArtifactMetadata, MvnpubError> {
    let name = required(config.name.as_deref(), "name")?;
    let description = required(config.description.as_deref(), "description")?;
    let url = config
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    let license = config.license.as_ref();
    let license = License {
        name: required(license.and_then(|l| l.name.as_deref()), "license.name")?,
        url: required(license.and_then(|l| l.url.as_deref()), "license.url")?,
    };

    if config.developers.is_empty() {
        return Err(missing("developers"));
    }
    let developers = config
        .developers
        .iter()
        .enumerate()
        .map(|(i, d)| {
            Ok(Developer {
                id: required(d.id.as_deref(), &format!("developers[{i}].id"))?,
                name: required(d.name.as_deref(), &format!("developers[{i}].name"))?,
                email: required(d.email.as_deref(), &format!("developers[{i}].email"))?,
            })
        })
        .collect::<Result<Vec<_>, MvnpubError>>()?;

    let scm = config.scm.as_ref();
    let scm = Scm {
        connection: required(scm.and_then(|s| s.connection.as_deref()), "scm.connection")?,
        developer_connection: required(
            scm.and_then(|s| s.developer_connection.as_deref()),
            "scm.developer-connection",
        )?,
        url: required(scm.and_then(|s| s.url.as_deref()), "scm.url")?,
    };

    Ok(ArtifactMetadata {
        name,
        description,
        url,
        license,
        developers,
        scm,
    })
}

fn required(value: Option<&str>, field: &str) -> Result<String, MvnpubError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(missing(field)),
    }
}

fn missing(field: &str) -> MvnpubError {
    MvnpubError::MissingMetadataField {
        field: field.to_string(),
    }
}

/// Render the POM for `coords` and `metadata`.
pub fn render_pom(
    coords: &Coordinates,
    metadata: &ArtifactMetadata,
    packaging: &str,
) -> Result<String, MvnpubError> {
    let mut doc = XmlDoc::new()?;
    doc.open_with(
        "project",
        &[
            ("xmlns", POM_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", POM_SCHEMA_LOCATION),
        ],
    )?;
    doc.text("modelVersion", "4.0.0")?;
    doc.text("groupId", &coords.group)?;
    doc.text("artifactId", &coords.artifact)?;
    doc.text("version", coords.version.as_str())?;
    doc.text("packaging", packaging)?;
    doc.text("name", &metadata.name)?;
    doc.text("description", &metadata.description)?;
    if let Some(ref url) = metadata.url {
        doc.text("url", url)?;
    }

    doc.open("licenses")?;
    doc.open("license")?;
    doc.text("name", &metadata.license.name)?;
    doc.text("url", &metadata.license.url)?;
    doc.close("license")?;
    doc.close("licenses")?;

    doc.open("developers")?;
    for dev in &metadata.developers {
        doc.open("developer")?;
        doc.text("id", &dev.id)?;
        doc.text("name", &dev.name)?;
        doc.text("email", &dev.email)?;
        doc.close("developer")?;
    }
    doc.close("developers")?;

    doc.open("scm")?;
    doc.text("connection", &metadata.scm.connection)?;
    doc.text("developerConnection", &metadata.scm.developer_connection)?;
    doc.text("url", &metadata.scm.url)?;
    doc.close("scm")?;

    doc.close("project")?;
    Ok(doc.finish())
}
