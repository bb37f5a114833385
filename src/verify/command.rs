//! Token helper invoked as an external command

use crate::error::{Error, Result};
use crate::verify::Verifier;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Verifier backed by an external helper program
///
/// The helper is called as `<program> [args..] <site_key> <action>` and must
/// print the token on stdout. It counts as ready once `<program> [args..]
/// --version` exits successfully.
#[derive(Debug, Clone)]
pub struct CommandVerifier {
    program: String,
    args: Vec<String>,
}

impl CommandVerifier {
    /// Parse a whitespace-separated command line
    pub fn new(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| Error::Config("verification command is empty".to_string()))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Program name
    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Verifier for CommandVerifier {
    async fn is_ready(&self) -> bool {
        Command::new(&self.program)
            .args(&self.args)
            .arg("--version")
            .output()
            .await
            .is_ok_and(|out| out.status.success())
    }

    async fn execute(&self, site_key: &str, action: &str) -> Result<String> {
        debug!(program = %self.program, action, "requesting token from helper");

        let output = Command::new(&self.program)
            .args(&self.args)
            .args([site_key, action])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::Verification(if stderr.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr
            }));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(Error::Verification(format!(
                "{} printed no token",
                self.program
            )));
        }
        Ok(token)
    }
}
