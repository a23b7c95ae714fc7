//! Operation: build the bundle for one version and publish it.

use std::path::Path;
use std::time::Duration;

use mvnpub_core::credentials::Credential;
use mvnpub_core::manifest::ArtifactsConfig;
use mvnpub_maven::bundle::{self, Artifact, ArtifactBundle, ArtifactRole};
use mvnpub_maven::pom;
use mvnpub_maven::portal::PublishingType;
use mvnpub_maven::publish::{PublishResult, Publisher};
use mvnpub_maven::repository::{self, Endpoints, RepositoryTarget};
use mvnpub_maven::sign::GpgSigner;
use mvnpub_maven::transport::{DryRunTransport, HttpTransport, Transport};
use mvnpub_util::errors::MvnpubError;
use mvnpub_util::fs::resolve_against;
use mvnpub_util::progress::{spinner, status, status_info, status_warn};

use crate::project::Project;

/// Extension used when `[artifacts] extension` is not set.
pub const DEFAULT_EXTENSION: &str = "jar";

/// Command-line choices for one publish run. `None` leaves the decision to
/// the manifest or global configuration.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    pub version: Option<String>,
    pub sign: Option<bool>,
    pub dry_run: bool,
    pub timeout_secs: Option<u64>,
    pub username_key: Option<String>,
    pub password_key: Option<String>,
    /// Raw `key=value` property overrides.
    pub properties: Vec<String>,
    pub publishing_type: Option<String>,
}

/// Load the project at `project_root` and publish it.
pub async fn publish(project_root: &Path, opts: &PublishOptions) -> miette::Result<PublishResult> {
    let project = Project::load(project_root, &opts.properties)?;
    publish_project(&project, opts).await
}

/// Publish an already loaded project. Ctrl-C aborts the run.
pub async fn publish_project(
    project: &Project,
    opts: &PublishOptions,
) -> miette::Result<PublishResult> {
    let manifest = &project.manifest;
    let resolver = project.resolver();

    let coords = project.coordinates(opts.version.as_deref())?;
    let endpoints = Endpoints::with_overrides(
        manifest.repositories.snapshot.as_deref(),
        manifest.repositories.release.as_deref(),
    );
    let target = repository::route(&coords.version, &endpoints);

    let metadata = pom::assemble(&manifest.metadata)?;
    let (primary, sources, docs) = load_artifacts(&project.root, &manifest.artifacts)?;
    let bundle = bundle::build(coords, metadata, primary, sources, docs)?;

    let names =
        project.credential_names(opts.username_key.as_deref(), opts.password_key.as_deref());
    let credential = resolver.resolve(&names);

    let timeout_secs = opts
        .timeout_secs
        .or(manifest.publish.timeout_secs)
        .unwrap_or(project.global.publish.timeout_secs);
    if timeout_secs == 0 {
        return Err(MvnpubError::Manifest {
            message: "timeout-secs must be at least 1 second".to_string(),
        }
        .into());
    }
    let timeout = Duration::from_secs(timeout_secs);
    let publishing_type = match opts
        .publishing_type
        .as_deref()
        .or(manifest.publish.publishing_type.as_deref())
        .or(project.global.publish.publishing_type.as_deref())
    {
        Some(raw) => PublishingType::parse(raw)?,
        None => PublishingType::default(),
    };
    let signing_enabled = opts.sign.or(manifest.signing.enabled).unwrap_or(true);

    let (key_id_name, passphrase_name) = project.signing_names();
    let signer = GpgSigner::new(project.signing_program())
        .with_key_id(resolver.value(&key_id_name))
        .with_passphrase(resolver.value(&passphrase_name));

    status(
        "Packaging",
        &format!(
            "{} {} ({} artifact(s) + POM)",
            bundle.metadata().name,
            bundle.coordinates(),
            bundle.artifacts().len()
        ),
    );

    let dry_run = DryRunTransport::new();
    let http;
    let transport: &dyn Transport = if opts.dry_run {
        &dry_run
    } else {
        http = HttpTransport::new(timeout)?;
        &http
    };

    let mut publisher = Publisher::new(transport)
        .with_timeout(timeout)
        .with_publishing_type(publishing_type)
        .with_credential_names(resolver.unresolved(&names));
    if signing_enabled {
        publisher = publisher.with_signer(&signer);
    }

    let sp = spinner(&format!("Publishing {} to {}...", bundle.coordinates(), target.url));
    let outcome = run_interruptible(
        &publisher,
        &bundle,
        &target,
        credential.as_ref(),
        signing_enabled,
    )
    .await;
    sp.finish_and_clear();
    let result = outcome?;

    if opts.dry_run {
        for req in dry_run.requests() {
            status_info(
                "Would send",
                &format!("{} {} ({} bytes)", req.method, req.url, req.bytes),
            );
        }
        status_info(
            "Dry run",
            &format!(
                "{} {} to {} ({} files, nothing uploaded)",
                result.kind,
                bundle.coordinates(),
                result.target_url,
                result.files_uploaded
            ),
        );
    } else {
        report(&bundle, &result);
    }
    Ok(result)
}

async fn run_interruptible(
    publisher: &Publisher<'_>,
    bundle: &ArtifactBundle,
    target: &RepositoryTarget,
    credential: Option<&Credential>,
    signing_enabled: bool,
) -> miette::Result<PublishResult> {
    tokio::select! {
        res = publisher.publish(bundle, target, credential, signing_enabled) => {
            res.map_err(|e| {
                if !e.is_local() {
                    status_warn("Failed", "nothing from this run was published, safe to re-run");
                }
                miette::Report::from(e)
            })
        }
        _ = tokio::signal::ctrl_c() => Err(MvnpubError::Generic {
            message: format!("Publishing {} interrupted", bundle.coordinates()),
        }
        .into()),
    }
}

fn report(bundle: &ArtifactBundle, result: &PublishResult) {
    status(
        "Published",
        &format!(
            "{} {} to {} ({} files{})",
            result.kind,
            bundle.coordinates(),
            result.target_url,
            result.files_uploaded,
            if result.signed { ", signed" } else { "" }
        ),
    );
    if let Some(ref id) = result.deployment_id {
        status_info("Deployment", id);
    }
}

/// Read the configured artifacts. A configured primary that does not exist
/// counts as absent. Configured sources or docs must exist.
pub fn load_artifacts(
    root: &Path,
    config: &ArtifactsConfig,
) -> Result<(Option<Artifact>, Option<Artifact>, Option<Artifact>), MvnpubError> {
    let extension = config.extension.as_deref().unwrap_or(DEFAULT_EXTENSION);

    let primary = match config.primary.as_deref() {
        Some(p) => {
            let path = resolve_against(root, p);
            if path.is_file() {
                Some(Artifact::from_path(ArtifactRole::Primary, extension, &path)?)
            } else {
                tracing::debug!("primary artifact {} not found", path.display());
                None
            }
        }
        None => None,
    };
    let sources = config
        .sources
        .as_deref()
        .map(|p| Artifact::from_path(ArtifactRole::Sources, "jar", &resolve_against(root, p)))
        .transpose()?;
    let docs = config
        .docs
        .as_deref()
        .map(|p| Artifact::from_path(ArtifactRole::Docs, "jar", &resolve_against(root, p)))
        .transpose()?;

    Ok((primary, sources, docs))
}
