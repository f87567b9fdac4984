use std::time::Duration;
use thiserror::Error;

/// Why a load attempt failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The relay did not answer within the bound
    #[error("Request timed out after {}", describe_duration(.0))]
    Timeout(Duration),

    /// Connection-level failure
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx reply
    #[error("Relay returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// 2xx reply carrying an explicit `error`
    #[error("{0}")]
    Relay(String),

    /// 2xx reply whose body is not a valid content envelope
    #[error("Invalid response format: {0}")]
    Malformed(String),

    /// The request task died before producing a reply
    #[error("Internal error: {0}")]
    Internal(String),
}

/// "15 seconds", "1 second", "250 milliseconds"
pub(crate) fn describe_duration(duration: &Duration) -> String {
    if duration.subsec_nanos() == 0 {
        match duration.as_secs() {
            1 => "1 second".to_string(),
            secs => format!("{} seconds", secs),
        }
    } else {
        format!("{} milliseconds", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = LoadError::Timeout(Duration::from_secs(15));
        assert_eq!(err.to_string(), "Request timed out after 15 seconds");
    }

    #[test]
    fn test_describe_duration() {
        assert_eq!(describe_duration(&Duration::from_secs(1)), "1 second");
        assert_eq!(describe_duration(&Duration::from_millis(250)), "250 milliseconds");
    }
}
