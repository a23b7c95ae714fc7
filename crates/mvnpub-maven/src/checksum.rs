//! Checksum sidecar files published next to every artifact.

use mvnpub_util::hash::{md5_bytes, sha1_bytes, sha256_bytes, sha512_bytes};

/// Sidecar extensions, in the order they are uploaded.
pub const SIDECAR_EXTENSIONS: [&str; 4] = ["md5", "sha1", "sha256", "sha512"];

/// Compute the `(extension, hex digest)` sidecars for `data`.
///
/// Central requires MD5 and SHA-1; SHA-256 and SHA-512 are accepted and
/// validated when present.
pub fn sidecars(data: &[u8]) -> Vec<(&'static str, String)> {
    vec![
        ("md5", md5_bytes(data)),
        ("sha1", sha1_bytes(data)),
        ("sha256", sha256_bytes(data)),
        ("sha512", sha512_bytes(data)),
    ]
}
