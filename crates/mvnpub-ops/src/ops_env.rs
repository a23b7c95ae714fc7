//! Operation: report where each configured name resolves from.

use mvnpub_core::credentials::Resolved;

use crate::project::Project;

/// One configured name and what it resolved to, if anything.
#[derive(Debug, Clone)]
pub struct EnvEntry {
    pub role: &'static str,
    pub name: String,
    pub resolved: Option<Resolved>,
}

/// Resolve the credential and signing names of `project`.
pub fn env(project: &Project) -> Vec<EnvEntry> {
    let resolver = project.resolver();
    let names = project.credential_names(None, None);
    let (key_id, passphrase) = project.signing_names();

    [
        ("username", names.username),
        ("password", names.password),
        ("signing key", key_id),
        ("signing password", passphrase),
    ]
    .into_iter()
    .map(|(role, name)| EnvEntry {
        role,
        resolved: resolver.lookup(&name),
        name,
    })
    .collect()
}
