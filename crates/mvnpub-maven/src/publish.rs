//! Publishing a bundle: sign, check credentials, upload.
//!
//! A publish moves through `Assembled -> Signed? -> Uploaded -> Done`.
//! Any step can end in `Failed`, and nothing is uploaded after a failure in
//! an earlier step. There are no retries here: a failed publish can simply
//! be run again, because neither upload layout exposes partial results.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mvnpub_core::config::DEFAULT_TIMEOUT_SECS;
use mvnpub_core::credentials::{Credential, CredentialNames};
use mvnpub_core::version::VersionKind;
use mvnpub_util::errors::MvnpubError;

use crate::auth::{self, Auth};
use crate::bundle::ArtifactBundle;
use crate::layout::{self, UploadFile};
use crate::metadata;
use crate::portal::{self, PublishingType};
use crate::repository::RepositoryTarget;
use crate::sign::{Signature, Signer, SigningState};
use crate::transport::{Transport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Assembled,
    Signed,
    Uploaded,
    Done,
    Failed,
}

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub kind: VersionKind,
    pub target_url: String,
    /// Artifacts in the bundle (the POM is not counted).
    pub artifact_count: usize,
    /// Every file sent, including POM, signatures, checksums and metadata.
    pub files_uploaded: usize,
    pub signed: bool,
    /// Deployment id returned by the portal for release uploads.
    pub deployment_id: Option<String>,
}

/// Drives one publish operation over injected signing and transport
/// capabilities.
pub struct Publisher<'a> {
    transport: &'a dyn Transport,
    signer: Option<&'a dyn Signer>,
    timeout: Duration,
    publishing_type: PublishingType,
    credential_names: Vec<String>,
    clock: fn() -> DateTime<Utc>,
}

impl<'a> Publisher<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            transport,
            signer: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            publishing_type: PublishingType::default(),
            credential_names: Vec::new(),
            clock: Utc::now,
        }
    }

    pub fn with_signer(mut self, signer: &'a dyn Signer) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Bound on each signing call and on the whole upload phase.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_publishing_type(mut self, publishing_type: PublishingType) -> Self {
        self.publishing_type = publishing_type;
        self
    }

    /// Property names reported when the target needs a credential and none
    /// was given.
    pub fn with_credential_names(mut self, names: Vec<String>) -> Self {
        self.credential_names = names;
        self
    }

    /// Clock used for snapshot timestamps.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Publish `bundle` to `target`.
    pub async fn publish(
        &self,
        bundle: &ArtifactBundle,
        target: &RepositoryTarget,
        credential: Option<&Credential>,
        signing_enabled: bool,
    ) -> Result<PublishResult, MvnpubError> {
        let mut state = State::Assembled;
        let result = self
            .run(bundle, target, credential, signing_enabled, &mut state)
            .await;
        if let Err(ref e) = result {
            tracing::debug!("publish {:?} -> {:?}: {e}", state, State::Failed);
        }
        result
    }

    async fn run(
        &self,
        bundle: &ArtifactBundle,
        target: &RepositoryTarget,
        credential: Option<&Credential>,
        signing_enabled: bool,
        state: &mut State,
    ) -> Result<PublishResult, MvnpubError> {
        let signing = if signing_enabled {
            let signing = self.sign(bundle).await?;
            advance(state, State::Signed);
            signing
        } else {
            SigningState::Unsigned
        };

        let auth = match credential {
            Some(cred) => Some(auth::for_target(target, cred)),
            None if target.requires_auth => {
                return Err(self.missing_credential(target));
            }
            None => None,
        };

        let (files_uploaded, deployment_id) = self
            .bounded(format!("upload to {}", target.url), async {
                match target.kind {
                    VersionKind::Release => {
                        self.upload_portal(bundle, target, &signing, auth.as_ref())
                            .await
                    }
                    VersionKind::Snapshot => {
                        self.upload_snapshot(bundle, target, &signing, auth.as_ref())
                            .await
                    }
                }
            })
            .await??;
        advance(state, State::Uploaded);

        let result = PublishResult {
            kind: target.kind,
            target_url: target.url.clone(),
            artifact_count: bundle.artifacts().len(),
            files_uploaded,
            signed: signing.is_signed(),
            deployment_id,
        };
        advance(state, State::Done);
        Ok(result)
    }

    fn missing_credential(&self, target: &RepositoryTarget) -> MvnpubError {
        let defaults = CredentialNames::default();
        let name = if self.credential_names.is_empty() {
            format!("{} and {}", defaults.username, defaults.password)
        } else {
            self.credential_names.join(" and ")
        };
        MvnpubError::MissingCredential {
            name,
            target: format!("{} repository {}", target.kind, target.url),
        }
    }

    /// Sign every bundle entry in order. Stops at the first failure.
    async fn sign(&self, bundle: &ArtifactBundle) -> Result<SigningState, MvnpubError> {
        let coords = bundle.coordinates();
        let Some(signer) = self.signer else {
            return Err(MvnpubError::SigningFailed {
                file: coords.to_string(),
                reason: "signing is enabled but no signer is configured".to_string(),
            });
        };

        let mut signatures = Vec::new();
        for entry in bundle.entries() {
            let file_name = entry.file_name(&coords.artifact, coords.version.as_str());
            let armored = self
                .bounded(format!("signing {file_name}"), signer.sign(&file_name, entry.data))
                .await?
                .map_err(|e| MvnpubError::SigningFailed {
                    file: file_name.clone(),
                    reason: e.0,
                })?;
            signatures.push(Signature { file_name, armored });
        }
        Ok(SigningState::Signed(signatures))
    }

    /// One multipart POST of the whole bundle.
    async fn upload_portal(
        &self,
        bundle: &ArtifactBundle,
        target: &RepositoryTarget,
        signing: &SigningState,
        auth: Option<&Auth>,
    ) -> Result<(usize, Option<String>), MvnpubError> {
        let coords = bundle.coordinates();
        let files = layout::files(bundle, coords.version.as_str(), signing);
        let zip = portal::zip_bundle(&files)?;
        let url = portal::upload_url(&target.url, coords, self.publishing_type)?;

        tracing::info!("uploading {} files to {url}", files.len());
        let body = self
            .transport
            .post_bundle(&url, portal::BUNDLE_FILE_NAME, zip, auth)
            .await
            .map_err(|e| self.upload_error(&url, e))?;
        let id = body.trim();
        Ok((files.len(), (!id.is_empty()).then(|| id.to_string())))
    }

    /// Timestamped PUTs, committed by the version-level metadata uploaded last.
    async fn upload_snapshot(
        &self,
        bundle: &ArtifactBundle,
        target: &RepositoryTarget,
        signing: &SigningState,
        auth: Option<&Auth>,
    ) -> Result<(usize, Option<String>), MvnpubError> {
        let coords = bundle.coordinates();
        let dir = coords.version_path();
        let metadata_path = format!("{dir}/maven-metadata.xml");
        let metadata_url = format!("{}/{metadata_path}", target.url);

        let existing = self
            .transport
            .fetch(&metadata_url, auth)
            .await
            .map_err(|e| self.upload_error(&metadata_url, e))?;
        let build_number = match existing {
            Some(bytes) => {
                metadata::parse_snapshot_metadata(&String::from_utf8_lossy(&bytes))?
                    .next_build_number()
            }
            None => 1,
        };

        let now = (self.clock)();
        let label = layout::snapshot_label(coords.version.base(), &now, build_number);
        let metadata_xml = metadata::render_snapshot_metadata(bundle, &now, build_number)?;

        let mut files = layout::files(bundle, &label, signing);
        files.extend(layout::with_checksums(&metadata_path, metadata_xml.as_bytes()));

        tracing::info!(
            "uploading {} files to {} as {label}",
            files.len(),
            target.url
        );
        for UploadFile { path, data } in &files {
            let url = format!("{}/{path}", target.url);
            self.transport
                .put(&url, data.clone(), auth)
                .await
                .map_err(|e| self.upload_error(&url, e))?;
        }
        Ok((files.len(), None))
    }

    fn upload_error(&self, url: &str, err: TransportError) -> MvnpubError {
        match err {
            TransportError::Timeout => MvnpubError::Timeout {
                operation: format!("upload to {url}"),
                seconds: self.timeout.as_secs(),
            },
            other => MvnpubError::UploadFailed {
                url: url.to_string(),
                cause: other.to_string(),
            },
        }
    }

    async fn bounded<T>(
        &self,
        operation: String,
        fut: impl Future<Output = T>,
    ) -> Result<T, MvnpubError> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| MvnpubError::Timeout {
                operation,
                seconds: self.timeout.as_secs(),
            })
    }
}

fn advance(state: &mut State, next: State) {
    tracing::debug!("publish {:?} -> {:?}", state, next);
    *state = next;
}
