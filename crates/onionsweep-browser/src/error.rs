use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaptureError>;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("render timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("screenshot failed: {0}")]
    Screenshot(String),

    #[error("could not persist screenshot: {0}")]
    Persist(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CaptureError::Navigation("net::ERR_SOCKS_CONNECTION_FAILED".to_string());
        assert_eq!(
            err.to_string(),
            "navigation failed: net::ERR_SOCKS_CONNECTION_FAILED"
        );
    }

    #[test]
    fn test_timeout_error_mentions_duration() {
        let err = CaptureError::Timeout(std::time::Duration::from_secs(25));
        assert!(err.to_string().contains("25"));
    }
}
