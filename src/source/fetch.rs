//! Fetching remote repositories
//!
//! The resolver only needs "materialize this source under that directory";
//! the `Fetcher` trait keeps the transport swappable (git on the command
//! line in production, in-memory fakes in tests).

use crate::error::{RepocatError, RepocatResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Abstract fetch interface
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Materialize `source_id` as a checkout at `dest`.
    ///
    /// `dest` does not exist when this is called; its parent does.
    async fn fetch(&self, source_id: &str, dest: &Path) -> RepocatResult<()>;

    /// Human-readable fetcher name for display
    fn name(&self) -> &'static str;
}

/// Fetcher that shells out to `git clone`
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
    shallow: bool,
}

impl GitFetcher {
    /// Create a fetcher using the `git` on `PATH`
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            shallow: false,
        }
    }

    /// Use a specific git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Clone only the latest commit
    pub fn with_shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    /// Arguments passed to git for a clone of `source_id` into `dest`
    fn clone_args(&self, source_id: &str, dest: &Path) -> Vec<String> {
        let mut args = vec!["clone".to_string(), "--quiet".to_string()];
        if self.shallow {
            args.push("--depth".to_string());
            args.push("1".to_string());
        }
        args.push("--".to_string());
        args.push(source_id.to_string());
        args.push(dest.to_string_lossy().into_owned());
        args
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for GitFetcher {
    async fn fetch(&self, source_id: &str, dest: &Path) -> RepocatResult<()> {
        let args = self.clone_args(source_id, dest);
        debug!("Executing: {} {:?}", self.program, args);
        info!("Cloning {}", source_id);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RepocatError::fetch(source_id, format!("running {}: {}", self.program, e)))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("{} exited with {}", self.program, output.status),
                msg => msg.to_string(),
            };
            Err(RepocatError::fetch(source_id, reason))
        }
    }

    fn name(&self) -> &'static str {
        "git"
    }
}
