use std::process::{Output, Stdio};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::errors::MvnpubError;

/// Builder for constructing and executing external processes.
///
/// Sets the program, its arguments and the bytes fed to its stdin. The child
/// is killed if the returned future is dropped before it completes.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    stdin: Option<Vec<u8>>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Bytes written to the child's stdin, which is then closed.
    pub fn stdin(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(data.into());
        self
    }

    /// Execute the command and return its output.
    pub async fn exec(&self) -> Result<Output, MvnpubError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| MvnpubError::Process {
            message: format!("failed to spawn '{}': {e}", self.program),
        })?;

        if let Some(ref data) = self.stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(data).await?;
                pipe.shutdown().await?;
            }
        }

        child.wait_with_output().await.map_err(MvnpubError::from)
    }
}
