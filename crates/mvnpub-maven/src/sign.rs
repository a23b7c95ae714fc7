//! Detached signatures for published files.
//!
//! Signing is an opaque capability behind [`Signer`]. [`GpgSigner`] shells
//! out to `gpg`; tests substitute their own implementations.

use std::io::Write;

use async_trait::async_trait;
use mvnpub_util::process::CommandBuilder;

/// Why a signer refused to sign a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignError(pub String);

impl std::fmt::Display for SignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Produces an ASCII-armored detached signature for a file's bytes.
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign(&self, file_name: &str, data: &[u8]) -> Result<Vec<u8>, SignError>;
}

/// Signature of one bundle entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub file_name: String,
    pub armored: Vec<u8>,
}

/// Signing state of a bundle. `Signed` holds one signature per bundle
/// entry, in bundle order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SigningState {
    #[default]
    Unsigned,
    Signed(Vec<Signature>),
}

impl SigningState {
    pub fn is_signed(&self) -> bool {
        matches!(self, SigningState::Signed(_))
    }

    pub fn signatures(&self) -> &[Signature] {
        match self {
            SigningState::Unsigned => &[],
            SigningState::Signed(sigs) => sigs,
        }
    }
}

/// Signs with a local GnuPG installation.
pub struct GpgSigner {
    program: String,
    key_id: Option<String>,
    passphrase: Option<String>,
}

impl GpgSigner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            key_id: None,
            passphrase: None,
        }
    }

    /// Sign with a specific key (`--local-user`).
    pub fn with_key_id(mut self, key_id: Option<String>) -> Self {
        self.key_id = key_id;
        self
    }

    /// Unlock the key with a passphrase fed over stdin.
    pub fn with_passphrase(mut self, passphrase: Option<String>) -> Self {
        self.passphrase = passphrase;
        self
    }

    fn command(&self, input: &std::path::Path) -> CommandBuilder {
        let mut cmd = CommandBuilder::new(&self.program).args([
            "--batch",
            "--yes",
            "--armor",
            "--detach-sign",
            "--output",
            "-",
        ]);
        if let Some(ref key) = self.key_id {
            cmd = cmd.arg("--local-user").arg(key);
        }
        if let Some(ref pass) = self.passphrase {
            cmd = cmd
                .args(["--pinentry-mode", "loopback", "--passphrase-fd", "0"])
                .stdin(format!("{pass}\n").into_bytes());
        }
        cmd.arg(input.to_string_lossy())
    }
}

#[async_trait]
impl Signer for GpgSigner {
    async fn sign(&self, file_name: &str, data: &[u8]) -> Result<Vec<u8>, SignError> {
        let mut input = tempfile::NamedTempFile::new()
            .map_err(|e| SignError(format!("cannot create temp file: {e}")))?;
        input
            .write_all(data)
            .and_then(|_| input.flush())
            .map_err(|e| SignError(format!("cannot write temp file: {e}")))?;

        tracing::debug!("signing {file_name} with {}", self.program);
        let output = self
            .command(input.path())
            .exec()
            .await
            .map_err(|e| SignError(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SignError(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(SignError(format!("{} produced no signature", self.program)));
        }
        Ok(output.stdout)
    }
}
