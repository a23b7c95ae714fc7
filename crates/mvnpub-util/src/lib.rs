//! Shared utilities for mvnpub.
//!
//! This crate provides cross-cutting concerns used by the other mvnpub crates:
//! the unified error type, filesystem helpers, digest helpers, async process
//! spawning, and terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
