//! Domain errors raised while reading and decoding an iteration log.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VizError {
    /// The log file was not found before reading started.
    #[error("log file does not exist: {}\ncurrent directory: {}", path.display(), cwd.display())]
    MissingFile { path: PathBuf, cwd: PathBuf },

    /// A segment that cannot belong to any configuration.
    #[error("malformed log segment {segment:?}: {reason}")]
    MalformedLog { segment: String, reason: String },

    /// A data token that is not `<iteration><-><thread>`.
    #[error("cannot parse token #{position} {token:?} for {key}")]
    Parse {
        key: String,
        position: usize,
        token: String,
    },
}
