//! Maven repository publishing: destination routing, POM assembly, artifact
//! bundles, checksums, snapshot metadata, Central Portal bundles,
//! authentication, signing, and upload.

pub mod auth;
pub mod bundle;
pub mod checksum;
pub mod layout;
pub mod metadata;
pub mod pom;
pub mod portal;
pub mod publish;
pub mod repository;
pub mod sign;
pub mod transport;
mod xml;
