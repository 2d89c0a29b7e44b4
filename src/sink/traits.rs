//! Trait abstraction for submission output to enable mocking in tests

use crate::state::forms::SubmissionRecord;
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Where a downloaded submission ends up
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Persist the record and return the location it was written to
    async fn store(&self, record: &SubmissionRecord) -> Result<PathBuf>;
}
