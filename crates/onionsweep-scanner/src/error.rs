use std::path::PathBuf;
use thiserror::Error;

/// Fatal setup errors. Any of these aborts the run before a worker starts.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("proxy transport init failed: {0}")]
    ProxyInit(String),

    #[error("could not read targets from {}: {source}", path.display())]
    TargetRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no targets found in {}", path.display())]
    NoTargets { path: PathBuf },
}

/// Per-target fetch stage failures. These are folded into the target's
/// [`ScanRecord`](onionsweep_core::ScanRecord), never propagated across the
/// worker boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connect, proxy, or client-side timeout failure; no response
    #[error("transport error: {0}")]
    Transport(String),

    /// Response obtained with a status outside [200,300)
    #[error("http status {status}")]
    HttpStatus { status: u16 },

    /// 2xx response whose body could not be saved
    #[error("could not persist body: {source}")]
    Persist {
        status: u16,
        source: std::io::Error,
    },
}

impl FetchError {
    /// HTTP status, when a response was obtained before the failure.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::HttpStatus { status } | Self::Persist { status, .. } => Some(*status),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
