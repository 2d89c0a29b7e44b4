//! Pretty-printed JSON file output

use super::traits::SubmissionSink;
use crate::state::forms::SubmissionRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Writes each submission to one fixed path, replacing the previous file
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl SubmissionSink for FileSink {
    async fn store(&self, record: &SubmissionRecord) -> Result<PathBuf> {
        let content = record.to_pretty_json()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("writing {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "submission downloaded");
        Ok(self.path.clone())
    }
}
