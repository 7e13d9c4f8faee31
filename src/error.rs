/// Error taxonomy for srek.
///
/// Every fatal condition maps to exactly one of the exit codes documented on
/// the CLI (see `exit_code`). Parse and regex-compile errors are detected
/// before any file is touched and abort the whole program; I/O errors during
/// a per-file pass are recorded and do not prevent later files from running.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SrekError {
    #[error("no command line given")]
    NoCommandLine,

    #[error("invalid command line: {0}")]
    InvalidCommandLine(String),

    #[error("cannot read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read child stdout: {0}")]
    ChildReadFailed(std::io::Error),

    #[error("cannot write '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write to child stdin: {0}")]
    ChildWriteFailed(std::io::Error),

    #[error("invalid pattern '{pattern}': {message}")]
    RegexCompileFailed { pattern: String, message: String },

    #[error("failed to run shell command '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("argument cannot be empty for '{0}'")]
    EmptyArgument(char),
}

impl SrekError {
    /// Maps each variant to the process exit code documented on the CLI.
    /// Exit code 6 (allocation failure) has no corresponding variant: Rust
    /// has no way to catch an allocator abort and convert it into a normal
    /// error return, so that code can never be produced by this enum.
    pub fn exit_code(&self) -> i32 {
        match self {
            SrekError::NoCommandLine => 1,
            SrekError::InvalidCommandLine(_) => 2,
            SrekError::ReadFailed { .. } | SrekError::ChildReadFailed(_) => 3,
            SrekError::WriteFailed { .. } | SrekError::ChildWriteFailed(_) => 4,
            SrekError::RegexCompileFailed { .. } => 5,
            SrekError::SpawnFailed { .. } => 7,
            SrekError::EmptyArgument(_) => 8,
        }
    }
}

pub type Result<T> = std::result::Result<T, SrekError>;
