//! Command dispatch and handler modules.

mod env;
mod init;
mod pom;
mod publish;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Publish {
            version,
            sign,
            no_sign,
            dry_run,
            timeout,
            username_key,
            password_key,
            properties,
            publishing_type,
        } => publish::exec(mvnpub_ops::ops_publish::PublishOptions {
            version,
            sign: match (sign, no_sign) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            dry_run,
            timeout_secs: timeout,
            username_key,
            password_key,
            properties,
            publishing_type,
        }),
        Command::Pom { version } => pom::exec(version.as_deref()),
        Command::Init { group, artifact } => init::exec(group.as_deref(), artifact.as_deref()),
        Command::Env { reveal } => env::exec(reveal),
    }
}

/// Directory containing `Publish.toml`, searched upwards from the cwd.
fn project_root() -> Result<std::path::PathBuf> {
    let cwd = std::env::current_dir().map_err(mvnpub_util::errors::MvnpubError::Io)?;
    let root = mvnpub_ops::project::Project::discover(&cwd)?;
    tracing::debug!("project root: {}", root.display());
    Ok(root)
}
