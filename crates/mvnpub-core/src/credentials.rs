//! Layered credential lookup: property store first, then the environment.
//!
//! Resolution never fails. An unset name is simply absent, and callers decide
//! whether that matters at the point the credential is actually needed.

use std::collections::BTreeMap;
use std::fmt;

/// Default property holding the Central Portal user token name.
pub const DEFAULT_USERNAME_KEY: &str = "mavenCentralUsername";

/// Default property holding the Central Portal user token secret.
pub const DEFAULT_PASSWORD_KEY: &str = "mavenCentralPassword";

/// Default property holding the GPG key id used for signing.
pub const DEFAULT_SIGNING_KEY_ID_KEY: &str = "signing.keyId";

/// Default property holding the GPG key passphrase.
pub const DEFAULT_SIGNING_PASSWORD_KEY: &str = "signing.password";

/// An upload credential. The secret is redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub secret: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("secret", &"********")
            .finish()
    }
}

/// Property names to resolve for a username/secret pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialNames {
    pub username: String,
    pub password: String,
}

impl Default for CredentialNames {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME_KEY.to_string(),
            password: DEFAULT_PASSWORD_KEY.to_string(),
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Property,
    /// Environment variable, with the variable name that matched.
    Environment(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Property => write!(f, "property"),
            Source::Environment(var) => write!(f, "env {var}"),
        }
    }
}

/// A resolved value together with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: Source,
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Looks up named values in a property store, falling back to environment
/// variables.
pub struct CredentialResolver {
    properties: BTreeMap<String, String>,
    env: EnvLookup,
}

impl CredentialResolver {
    /// Resolver over `properties` and the real process environment.
    pub fn new(properties: BTreeMap<String, String>) -> Self {
        Self {
            properties,
            env: Box::new(|key| std::env::var(key).ok()),
        }
    }

    /// Replace the environment lookup.
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(env);
        self
    }

    /// Look up `name`: property store first, then the environment under the
    /// exact name, then under its SCREAMING_SNAKE form. Empty values are
    /// treated as unset.
    pub fn lookup(&self, name: &str) -> Option<Resolved> {
        if let Some(value) = self.properties.get(name).filter(|v| !v.is_empty()) {
            return Some(Resolved {
                value: value.clone(),
                source: Source::Property,
            });
        }

        let snake = screaming_snake(name);
        let mut candidates = vec![name.to_string()];
        if snake != name {
            candidates.push(snake);
        }
        candidates.into_iter().find_map(|var| {
            (self.env)(&var)
                .filter(|v| !v.is_empty())
                .map(|value| Resolved {
                    value,
                    source: Source::Environment(var),
                })
        })
    }

    /// Look up `name` and return just the value.
    pub fn value(&self, name: &str) -> Option<String> {
        self.lookup(name).map(|r| r.value)
    }

    /// Resolve a username/secret pair. Absent unless both halves resolve.
    pub fn resolve(&self, names: &CredentialNames) -> Option<Credential> {
        let username = self.lookup(&names.username);
        let secret = self.lookup(&names.password);
        match (username, secret) {
            (Some(u), Some(s)) => {
                tracing::debug!(
                    "credential '{}' resolved from {}, '{}' from {}",
                    names.username,
                    u.source,
                    names.password,
                    s.source
                );
                Some(Credential::new(u.value, s.value))
            }
            (u, s) => {
                tracing::debug!(
                    "credential incomplete: '{}' {}, '{}' {}",
                    names.username,
                    if u.is_some() { "set" } else { "unset" },
                    names.password,
                    if s.is_some() { "set" } else { "unset" }
                );
                None
            }
        }
    }

    /// Names from `names` that do not resolve, username first.
    pub fn unresolved(&self, names: &CredentialNames) -> Vec<String> {
        [&names.username, &names.password]
            .into_iter()
            .filter(|name| self.lookup(name).is_none())
            .cloned()
            .collect()
    }
}

/// `mavenCentralUsername` -> `MAVEN_CENTRAL_USERNAME`,
/// `signing.keyId` -> `SIGNING_KEY_ID`.
pub fn screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_uppercase());
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            prev_lower = false;
        }
    }
    out
}
