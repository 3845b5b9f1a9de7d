use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing reports to disk.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output folder {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
