//! Output destinations for rendered windows

use crate::domain::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Destination for rendered window text
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Writes `content` to `relative_path`, overwriting any existing file
    ///
    /// Returns the location that was written.
    async fn write_file(&self, relative_path: &str, content: &str) -> Result<PathBuf>;
}

/// Writes files below a root directory, creating it on first use
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl OutputSink for FsSink {
    async fn write_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
        Ok(path)
    }
}
