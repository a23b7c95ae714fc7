use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mvnpub_core::credentials::Credential;
use mvnpub_core::manifest::{DeveloperConfig, LicenseConfig, MetadataConfig, ScmConfig};
use mvnpub_core::version::{ArtifactVersion, Coordinates, VersionKind};
use mvnpub_maven::auth::Auth;
use mvnpub_maven::bundle::{self, Artifact, ArtifactBundle, ArtifactRole};
use mvnpub_maven::pom;
use mvnpub_maven::publish::Publisher;
use mvnpub_maven::repository::{self, Endpoints, CENTRAL_PORTAL_UPLOAD_URL, CENTRAL_SNAPSHOTS_URL};
use mvnpub_maven::sign::{SignError, Signer};
use mvnpub_maven::transport::{Transport, TransportError};
use mvnpub_util::errors::MvnpubError;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Fetch(String),
    Put(String),
    Post(String),
}

#[derive(Default)]
struct SpyTransport {
    calls: Mutex<Vec<Call>>,
    bundles: Mutex<Vec<Vec<u8>>>,
    existing_metadata: Option<String>,
    reject_with: Option<TransportError>,
    delay: Option<Duration>,
}

impl SpyTransport {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn maybe_delay(&self) {
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
    }
}

#[async_trait]
impl Transport for SpyTransport {
    async fn fetch(
        &self,
        url: &str,
        _auth: Option<&Auth>,
    ) -> Result<Option<Vec<u8>>, TransportError> {
        self.calls.lock().unwrap().push(Call::Fetch(url.to_string()));
        Ok(self.existing_metadata.clone().map(String::into_bytes))
    }

    async fn put(
        &self,
        url: &str,
        _body: Vec<u8>,
        _auth: Option<&Auth>,
    ) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(Call::Put(url.to_string()));
        self.maybe_delay().await;
        match self.reject_with.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn post_bundle(
        &self,
        url: &str,
        _file_name: &str,
        body: Vec<u8>,
        auth: Option<&Auth>,
    ) -> Result<String, TransportError> {
        assert!(matches!(auth, Some(Auth::Bearer(_))), "portal upload needs bearer auth");
        self.calls.lock().unwrap().push(Call::Post(url.to_string()));
        self.bundles.lock().unwrap().push(body);
        self.maybe_delay().await;
        match self.reject_with.clone() {
            Some(e) => Err(e),
            None => Ok("  b7e4c1d2-deployment\n".to_string()),
        }
    }
}

#[derive(Default)]
struct FakeSigner {
    signed: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
    delay: Option<Duration>,
}

#[async_trait]
impl Signer for FakeSigner {
    async fn sign(&self, file_name: &str, _data: &[u8]) -> Result<Vec<u8>, SignError> {
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        if self.fail_on.is_some_and(|suffix| file_name.ends_with(suffix)) {
            return Err(SignError("secret key not available".to_string()));
        }
        self.signed.lock().unwrap().push(file_name.to_string());
        Ok(format!("-----BEGIN PGP SIGNATURE-----\n{file_name}\n").into_bytes())
    }
}

struct CountingSigner(AtomicUsize);

#[async_trait]
impl Signer for CountingSigner {
    async fn sign(&self, _file_name: &str, _data: &[u8]) -> Result<Vec<u8>, SignError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(b"sig".to_vec())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn metadata_config() -> MetadataConfig {
    MetadataConfig {
        name: Some("Protify Core".to_string()),
        description: Some("Unified client for AI model providers".to_string()),
        url: Some("https://github.com/protify/protify".to_string()),
        license: Some(LicenseConfig {
            name: Some("Apache-2.0".to_string()),
            url: Some("https://www.apache.org/licenses/LICENSE-2.0".to_string()),
        }),
        developers: vec![DeveloperConfig {
            id: Some("protify".to_string()),
            name: Some("Protify Consulting".to_string()),
            email: Some("dev@protify.ai".to_string()),
        }],
        scm: Some(ScmConfig {
            connection: Some("scm:git:git://github.com/protify/protify.git".to_string()),
            developer_connection: Some(
                "scm:git:ssh://git@github.com/protify/protify.git".to_string(),
            ),
            url: Some("https://github.com/protify/protify".to_string()),
        }),
    }
}

fn coords(version: &str) -> Coordinates {
    Coordinates::new(
        "ai.protify",
        "protify-core",
        ArtifactVersion::parse(version).unwrap(),
    )
    .unwrap()
}

fn jar(role: ArtifactRole, content: &str) -> Artifact {
    Artifact::new(role, "jar", content.as_bytes().to_vec())
}

fn full_bundle(version: &str) -> ArtifactBundle {
    bundle::build(
        coords(version),
        pom::assemble(&metadata_config()).unwrap(),
        Some(jar(ArtifactRole::Primary, "classes")),
        Some(jar(ArtifactRole::Sources, "sources")),
        Some(jar(ArtifactRole::Docs, "javadoc")),
    )
    .unwrap()
}

fn credential() -> Credential {
    Credential::new("token-user", "token-secret")
}

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
}

fn target_for(version: &str) -> repository::RepositoryTarget {
    repository::route(&ArtifactVersion::parse(version).unwrap(), &Endpoints::default())
}

// ---------------------------------------------------------------------------
// Bundle builder
// ---------------------------------------------------------------------------

#[test]
fn bundle_with_primary_only_has_one_artifact() {
    let bundle = bundle::build(
        coords("1.0"),
        pom::assemble(&metadata_config()).unwrap(),
        Some(jar(ArtifactRole::Primary, "A")),
        None,
        None,
    )
    .unwrap();
    assert_eq!(bundle.artifacts().len(), 1);
    assert_eq!(bundle.artifacts()[0].data, b"A");
}

#[test]
fn bundle_keeps_primary_sources_docs_order() {
    let bundle = full_bundle("1.0");
    let roles: Vec<ArtifactRole> = bundle.artifacts().iter().map(|a| a.role).collect();
    assert_eq!(
        roles,
        [ArtifactRole::Primary, ArtifactRole::Sources, ArtifactRole::Docs]
    );
    let data: Vec<&[u8]> = bundle.artifacts().iter().map(|a| a.data.as_slice()).collect();
    assert_eq!(data, [b"classes".as_slice(), b"sources", b"javadoc"]);
}

#[test]
fn bundle_entries_end_with_pom() {
    let bundle = full_bundle("1.0");
    let names: Vec<String> = bundle
        .entries()
        .iter()
        .map(|e| e.file_name("protify-core", "1.0"))
        .collect();
    assert_eq!(
        names,
        [
            "protify-core-1.0.jar",
            "protify-core-1.0-sources.jar",
            "protify-core-1.0-javadoc.jar",
            "protify-core-1.0.pom",
        ]
    );
}

#[test]
fn bundle_without_primary_fails() {
    let err = bundle::build(
        coords("1.0"),
        pom::assemble(&metadata_config()).unwrap(),
        None,
        Some(jar(ArtifactRole::Sources, "B")),
        None,
    )
    .unwrap_err();
    match err {
        MvnpubError::MissingPrimaryArtifact { artifact } => {
            assert_eq!(artifact, "ai.protify:protify-core:1.0");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_signer_never_uploads() {
    let transport = SpyTransport::default();
    let signer = FakeSigner {
        fail_on: Some("-sources.jar"),
        ..Default::default()
    };
    let publisher = Publisher::new(&transport).with_signer(&signer);
    let cred = credential();

    let err = publisher
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), Some(&cred), true)
        .await
        .unwrap_err();

    match err {
        MvnpubError::SigningFailed { file, reason } => {
            assert_eq!(file, "protify-core-0.1.1-sources.jar");
            assert!(reason.contains("secret key"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn signing_enabled_without_signer_fails() {
    let transport = SpyTransport::default();
    let publisher = Publisher::new(&transport);
    let cred = credential();

    let err = publisher
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), Some(&cred), true)
        .await
        .unwrap_err();
    assert!(matches!(err, MvnpubError::SigningFailed { .. }), "got: {err}");
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn missing_credential_makes_no_network_calls() {
    let transport = SpyTransport::default();
    let publisher = Publisher::new(&transport);

    for version in ["0.1.1", "0.1.1-SNAPSHOT"] {
        let err = publisher
            .publish(&full_bundle(version), &target_for(version), None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, MvnpubError::MissingCredential { .. }), "got: {err}");
    }
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn missing_credential_names_the_unset_property() {
    let transport = SpyTransport::default();
    let publisher =
        Publisher::new(&transport).with_credential_names(vec!["nexusPassword".to_string()]);

    let err = publisher
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), None, false)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "Missing credential: nexusPassword (required by release repository {})",
            CENTRAL_PORTAL_UPLOAD_URL
        )
    );

    let err = Publisher::new(&transport)
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), None, false)
        .await
        .unwrap_err();
    assert!(
        err.to_string().contains("mavenCentralUsername and mavenCentralPassword"),
        "got: {err}"
    );
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn release_end_to_end_targets_portal() {
    let transport = SpyTransport::default();
    let signer = FakeSigner::default();
    let publisher = Publisher::new(&transport).with_signer(&signer);
    let cred = credential();

    let result = publisher
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), Some(&cred), true)
        .await
        .unwrap();

    assert_eq!(result.kind, VersionKind::Release);
    assert_eq!(result.target_url, CENTRAL_PORTAL_UPLOAD_URL);
    assert_eq!(result.artifact_count, 3);
    assert!(result.signed);
    assert_eq!(result.deployment_id.as_deref(), Some("b7e4c1d2-deployment"));
    // 4 entries x (file + asc + 4 checksums)
    assert_eq!(result.files_uploaded, 24);

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let Call::Post(ref url) = calls[0] else {
        panic!("expected a single POST, got {calls:?}");
    };
    assert!(url.starts_with(CENTRAL_PORTAL_UPLOAD_URL));
    assert!(url.contains("publishingType=USER_MANAGED"));

    assert_eq!(
        *signer.signed.lock().unwrap(),
        [
            "protify-core-0.1.1.jar",
            "protify-core-0.1.1-sources.jar",
            "protify-core-0.1.1-javadoc.jar",
            "protify-core-0.1.1.pom",
        ]
    );
}

#[tokio::test]
async fn release_bundle_zip_has_maven_layout() {
    let transport = SpyTransport::default();
    let signer = FakeSigner::default();
    let publisher = Publisher::new(&transport).with_signer(&signer);
    let cred = credential();

    let bundle = full_bundle("0.1.1");
    publisher
        .publish(&bundle, &target_for("0.1.1"), Some(&cred), true)
        .await
        .unwrap();

    let zip_bytes = transport.bundles.lock().unwrap()[0].clone();
    let mut archive = zip::ZipArchive::new(Cursor::new(zip_bytes)).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let dir = "ai/protify/protify-core/0.1.1";
    for expected in [
        format!("{dir}/protify-core-0.1.1.jar"),
        format!("{dir}/protify-core-0.1.1.jar.asc"),
        format!("{dir}/protify-core-0.1.1.jar.md5"),
        format!("{dir}/protify-core-0.1.1.jar.sha1"),
        format!("{dir}/protify-core-0.1.1-sources.jar.sha256"),
        format!("{dir}/protify-core-0.1.1-javadoc.jar.sha512"),
        format!("{dir}/protify-core-0.1.1.pom"),
        format!("{dir}/protify-core-0.1.1.pom.asc"),
    ] {
        assert!(names.contains(&expected), "missing {expected}: {names:?}");
    }
    assert!(!names.iter().any(|n| n.ends_with(".asc.md5")));

    let mut pom = Vec::new();
    archive
        .by_name("ai/protify/protify-core/0.1.1/protify-core-0.1.1.pom")
        .unwrap()
        .read_to_end(&mut pom)
        .unwrap();
    assert_eq!(pom, bundle.pom());
}

#[tokio::test]
async fn snapshot_end_to_end_targets_snapshot_repo() {
    let transport = SpyTransport::default();
    let signer = FakeSigner::default();
    let publisher = Publisher::new(&transport)
        .with_signer(&signer)
        .with_clock(fixed_clock);
    let cred = credential();

    let result = publisher
        .publish(
            &full_bundle("0.1.1-SNAPSHOT"),
            &target_for("0.1.1-SNAPSHOT"),
            Some(&cred),
            true,
        )
        .await
        .unwrap();

    assert_eq!(result.kind, VersionKind::Snapshot);
    assert_eq!(result.target_url, CENTRAL_SNAPSHOTS_URL);
    assert_eq!(result.artifact_count, 3);
    assert!(result.deployment_id.is_none());
}

#[tokio::test]
async fn snapshot_uploads_metadata_last_with_timestamped_names() {
    let transport = SpyTransport::default();
    let publisher = Publisher::new(&transport).with_clock(fixed_clock);
    let cred = credential();

    let result = publisher
        .publish(
            &full_bundle("0.1.1-SNAPSHOT"),
            &target_for("0.1.1-SNAPSHOT"),
            Some(&cred),
            false,
        )
        .await
        .unwrap();

    let calls = transport.calls();
    let base = format!("{CENTRAL_SNAPSHOTS_URL}/ai/protify/protify-core/0.1.1-SNAPSHOT");
    assert_eq!(calls[0], Call::Fetch(format!("{base}/maven-metadata.xml")));
    assert_eq!(
        calls[1],
        Call::Put(format!("{base}/protify-core-0.1.1-20260102.030405-1.jar"))
    );

    let puts: Vec<&String> = calls
        .iter()
        .filter_map(|c| match c {
            Call::Put(u) => Some(u),
            _ => None,
        })
        .collect();
    // 4 entries x (file + 4 checksums), then metadata + 4 checksums
    assert_eq!(puts.len(), 25);
    assert_eq!(result.files_uploaded, 25);

    let first_metadata = puts
        .iter()
        .position(|u| u.contains("maven-metadata.xml"))
        .unwrap();
    assert_eq!(first_metadata, 20);
    assert!(puts[first_metadata..]
        .iter()
        .all(|u| u.contains("maven-metadata.xml")));
    assert!(!puts.iter().any(|u| u.ends_with(".asc")));
}

#[tokio::test]
async fn snapshot_build_number_follows_existing_metadata() {
    let transport = SpyTransport {
        existing_metadata: Some(
            "<metadata><versioning><snapshot><timestamp>20251231.235959</timestamp>\
             <buildNumber>7</buildNumber></snapshot></versioning></metadata>"
                .to_string(),
        ),
        ..Default::default()
    };
    let publisher = Publisher::new(&transport).with_clock(fixed_clock);
    let cred = credential();

    publisher
        .publish(
            &full_bundle("0.1.1-SNAPSHOT"),
            &target_for("0.1.1-SNAPSHOT"),
            Some(&cred),
            false,
        )
        .await
        .unwrap();

    let calls = transport.calls();
    let sources = "protify-core-0.1.1-20260102.030405-8-sources.jar";
    assert!(calls
        .iter()
        .any(|c| matches!(c, Call::Put(u) if u.ends_with(sources))));
}

#[tokio::test]
async fn unsigned_release_has_no_signatures() {
    let transport = SpyTransport::default();
    let signer = CountingSigner(AtomicUsize::new(0));
    let publisher = Publisher::new(&transport).with_signer(&signer);
    let cred = credential();

    let result = publisher
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), Some(&cred), false)
        .await
        .unwrap();
    assert!(!result.signed);
    assert_eq!(result.files_uploaded, 20);
    assert_eq!(signer.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn server_rejection_is_upload_failed() {
    let transport = SpyTransport {
        reject_with: Some(TransportError::Rejected {
            status: 401,
            body: "Invalid token".to_string(),
        }),
        ..Default::default()
    };
    let publisher = Publisher::new(&transport);
    let cred = credential();

    let err = publisher
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), Some(&cred), false)
        .await
        .unwrap_err();
    match err {
        MvnpubError::UploadFailed { url, cause } => {
            assert!(url.starts_with(CENTRAL_PORTAL_UPLOAD_URL));
            assert_eq!(cause, "HTTP 401: Invalid token");
        }
        other => panic!("unexpected error: {other}"),
    }
    // no retry
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn snapshot_rejection_stops_before_metadata() {
    let transport = SpyTransport {
        reject_with: Some(TransportError::Failed("connection reset".to_string())),
        ..Default::default()
    };
    let publisher = Publisher::new(&transport).with_clock(fixed_clock);
    let cred = credential();

    let err = publisher
        .publish(
            &full_bundle("0.1.1-SNAPSHOT"),
            &target_for("0.1.1-SNAPSHOT"),
            Some(&cred),
            false,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MvnpubError::UploadFailed { .. }), "got: {err}");
    assert!(!transport
        .calls()
        .iter()
        .any(|c| matches!(c, Call::Put(u) if u.contains("maven-metadata.xml"))));
}

#[tokio::test]
async fn transport_timeout_is_timeout_not_upload_failed() {
    let transport = SpyTransport {
        reject_with: Some(TransportError::Timeout),
        ..Default::default()
    };
    let publisher = Publisher::new(&transport);
    let cred = credential();

    let err = publisher
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), Some(&cred), false)
        .await
        .unwrap_err();
    assert!(matches!(err, MvnpubError::Timeout { .. }), "got: {err}");
}

#[tokio::test]
async fn slow_upload_hits_timeout() {
    let transport = SpyTransport {
        delay: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    let publisher = Publisher::new(&transport).with_timeout(Duration::from_millis(50));
    let cred = credential();

    let err = publisher
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), Some(&cred), false)
        .await
        .unwrap_err();
    match err {
        MvnpubError::Timeout { operation, .. } => assert!(operation.starts_with("upload to")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn slow_signer_hits_timeout_and_skips_upload() {
    let transport = SpyTransport::default();
    let signer = FakeSigner {
        delay: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    let publisher = Publisher::new(&transport)
        .with_signer(&signer)
        .with_timeout(Duration::from_millis(50));
    let cred = credential();

    let err = publisher
        .publish(&full_bundle("0.1.1"), &target_for("0.1.1"), Some(&cred), true)
        .await
        .unwrap_err();
    match err {
        MvnpubError::Timeout { operation, .. } => {
            assert_eq!(operation, "signing protify-core-0.1.1.jar");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(transport.calls().is_empty());
}
