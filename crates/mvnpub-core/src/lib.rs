//! Core data types for mvnpub.
//!
//! This crate defines what a publish run is made of before anything touches
//! the network: artifact versions and coordinates, property stores and the
//! layered credential lookup over them, the `Publish.toml` manifest, and the
//! user-level configuration.
//!
//! This crate is intentionally free of async code and network I/O.

/// Name of the project manifest.
pub const MANIFEST_FILE: &str = "Publish.toml";

/// Name of the property store next to the manifest and in `~/.mvnpub/`.
pub const PROPERTIES_FILE: &str = "publish.properties";

pub mod config;
pub mod credentials;
pub mod manifest;
pub mod properties;
pub mod version;
