#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const MANIFEST: &str = r#"
[coordinates]
group = "ai.protify"
artifact = "protify-core"
version = "0.1.1"

[metadata]
name = "Protify Core"
description = "Unified client for AI model providers & friends"
url = "https://github.com/protify/protify"
license = { name = "Apache-2.0", url = "https://www.apache.org/licenses/LICENSE-2.0" }
developers = [{ id = "protify", name = "Protify Consulting", email = "dev@protify.ai" }]
scm = { connection = "scm:git:git://github.com/protify/protify.git", developer-connection = "scm:git:ssh://git@github.com/protify/protify.git", url = "https://github.com/protify/protify" }

[artifacts]
primary = "build/libs/protify-core.jar"
sources = "build/libs/protify-core-sources.jar"
docs = "build/libs/protify-core-javadoc.jar"
"#;

/// A project directory plus an isolated home directory.
pub struct Workspace {
    pub project: TempDir,
    pub home: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        }
    }

    /// A project with a full manifest and built artifacts.
    pub fn with_project() -> Self {
        let ws = Self::new();
        fs::write(ws.project.path().join("Publish.toml"), MANIFEST).unwrap();
        let libs = ws.project.path().join("build/libs");
        fs::create_dir_all(&libs).unwrap();
        fs::write(libs.join("protify-core.jar"), b"classes").unwrap();
        fs::write(libs.join("protify-core-sources.jar"), b"sources").unwrap();
        fs::write(libs.join("protify-core-javadoc.jar"), b"javadoc").unwrap();
        ws
    }

    pub fn path(&self) -> &Path {
        self.project.path()
    }

    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("mvnpub").unwrap();
        cmd.current_dir(self.project.path())
            .env("HOME", self.home.path())
            .env("USERPROFILE", self.home.path())
            .env_remove("RUST_LOG")
            .env_remove("mavenCentralUsername")
            .env_remove("mavenCentralPassword")
            .env_remove("MAVEN_CENTRAL_USERNAME")
            .env_remove("MAVEN_CENTRAL_PASSWORD");
        cmd
    }
}
