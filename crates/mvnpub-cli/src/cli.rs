//! CLI argument definitions for mvnpub.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "mvnpub",
    version,
    about = "Publish JVM library artifacts to Maven Central",
    long_about = "mvnpub signs a library's artifacts, generates its POM and uploads the bundle \
                  to the Central Portal. SNAPSHOT versions go to the snapshot repository, \
                  everything else becomes a staging deployment."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign and upload the configured artifacts
    Publish {
        /// Version to publish (defaults to [coordinates] version)
        version: Option<String>,
        /// Sign artifacts with GPG
        #[arg(long, conflicts_with = "no_sign")]
        sign: bool,
        /// Skip signing
        #[arg(long)]
        no_sign: bool,
        /// Show what would be uploaded without touching the network
        #[arg(long)]
        dry_run: bool,
        /// Bound on signing and upload, in seconds
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
        /// Property name holding the repository username
        #[arg(long, value_name = "KEY")]
        username_key: Option<String>,
        /// Property name holding the repository password
        #[arg(long, value_name = "KEY")]
        password_key: Option<String>,
        /// Set a property, overriding publish.properties
        #[arg(short = 'P', long = "property", value_name = "KEY=VALUE")]
        properties: Vec<String>,
        /// Release the deployment automatically once validated
        #[arg(long, value_parser = ["automatic", "user-managed"])]
        publishing_type: Option<String>,
    },

    /// Print the POM that would be published
    Pom {
        /// Version to render (defaults to [coordinates] version)
        version: Option<String>,
    },

    /// Create Publish.toml and publish.properties in the current directory
    Init {
        /// Maven group id
        #[arg(long)]
        group: Option<String>,
        /// Maven artifact id (defaults to the directory name)
        #[arg(long)]
        artifact: Option<String>,
    },

    /// Show where credentials and signing settings resolve from
    Env {
        /// Show secret values unmasked
        #[arg(long)]
        reveal: bool,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
