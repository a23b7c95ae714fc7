//! Repository authentication.
//!
//! Snapshot repositories take HTTP basic auth. The Central Portal API takes
//! a bearer token made of the base64-encoded `username:password` user token.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mvnpub_core::credentials::Credential;
use mvnpub_core::version::VersionKind;
use reqwest::RequestBuilder;

use crate::repository::RepositoryTarget;

/// Authentication to attach to a request.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    Basic { username: String, password: String },
    Bearer(String),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Basic { username, .. } => write!(f, "Basic({username}, ********)"),
            Auth::Bearer(_) => write!(f, "Bearer(********)"),
        }
    }
}

/// The authentication scheme `target` expects for `credential`.
pub fn for_target(target: &RepositoryTarget, credential: &Credential) -> Auth {
    match target.kind {
        VersionKind::Snapshot => Auth::Basic {
            username: credential.username.clone(),
            password: credential.secret.clone(),
        },
        VersionKind::Release => Auth::Bearer(portal_token(credential)),
    }
}

/// `base64(username:secret)`, as the portal expects in `Authorization: Bearer`.
pub fn portal_token(credential: &Credential) -> String {
    STANDARD.encode(format!("{}:{}", credential.username, credential.secret))
}

/// Apply authentication to a request if there is any.
pub fn apply_auth(request: RequestBuilder, auth: Option<&Auth>) -> RequestBuilder {
    match auth {
        Some(Auth::Basic { username, password }) => request.basic_auth(username, Some(password)),
        Some(Auth::Bearer(token)) => request.bearer_auth(token),
        None => request,
    }
}
