//! Operation: render the POM that `publish` would upload.

use mvnpub_maven::pom;
use mvnpub_util::errors::MvnpubResult;

use crate::ops_publish::DEFAULT_EXTENSION;
use crate::project::Project;

pub fn pom(project: &Project, version: Option<&str>) -> MvnpubResult<String> {
    let coords = project.coordinates(version)?;
    let metadata = pom::assemble(&project.manifest.metadata)?;
    let packaging = project
        .manifest
        .artifacts
        .extension
        .as_deref()
        .unwrap_or(DEFAULT_EXTENSION);
    Ok(pom::render_pom(&coords, &metadata, packaging)?)
}
