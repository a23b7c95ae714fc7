//! Operation: set up publishing in an existing directory.

use std::path::Path;

use mvnpub_core::manifest;
use mvnpub_core::{MANIFEST_FILE, PROPERTIES_FILE};
use mvnpub_util::errors::MvnpubError;
use mvnpub_util::fs::write_new;

/// Group used when none is given.
pub const DEFAULT_GROUP: &str = "com.example";

const PROPERTIES_HEADER: &str = "\
# Local publishing secrets. Keep this file out of version control.
#mavenCentralUsername=
#mavenCentralPassword=
#signing.keyId=
#signing.password=
";

/// Write a template `Publish.toml` and an empty `publish.properties` into
/// `dir`. An existing `Publish.toml` is never overwritten. An existing
/// `publish.properties` is left alone.
pub fn init(dir: &Path, group: Option<&str>, artifact: Option<&str>) -> miette::Result<()> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if manifest_path.exists() {
        return Err(MvnpubError::Manifest {
            message: format!("{MANIFEST_FILE} already exists in {}", dir.display()),
        }
        .into());
    }

    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "library".to_string());
    let artifact = artifact.unwrap_or(&dir_name);
    let group = group.unwrap_or(DEFAULT_GROUP);

    write_new(&manifest_path, &manifest::template(group, artifact)).map_err(MvnpubError::Io)?;
    let properties_path = dir.join(PROPERTIES_FILE);
    if !properties_path.exists() {
        write_new(&properties_path, PROPERTIES_HEADER).map_err(MvnpubError::Io)?;
    }

    mvnpub_util::progress::status("Created", &format!("{MANIFEST_FILE} for {group}:{artifact}"));
    Ok(())
}
