//! Destinations for accepted submissions

mod file;
mod traits;

pub use file::FileSink;
pub use traits::SubmissionSink;

#[cfg(test)]
pub use traits::MockSubmissionSink;
