use thiserror::Error;

/// Result alias for media server calls
pub type Result<T> = std::result::Result<T, MediaServerError>;

/// Failures surfaced by the media server client
///
/// Transport errors are always translated into one of these variants, so
/// handlers never see a raw `reqwest` status.
#[derive(Error, Debug)]
pub enum MediaServerError {
    /// Login rejected or token refused (401/403)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Item, library or session does not exist (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response
    #[error("Media server API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Request exceeded the configured timeout
    #[error("Media server request timed out")]
    Timeout,

    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// 2xx response whose body could not be parsed
    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl MediaServerError {
    /// Map a non-2xx status code and body text to an error variant
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            401 | 403 => Self::Unauthorized(message.into()),
            404 => Self::NotFound(message.into()),
            _ => Self::Api {
                code,
                message: message.into(),
            },
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl From<reqwest::Error> for MediaServerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert!(MediaServerError::from_status_code(401, "nope").is_auth_error());
        assert!(MediaServerError::from_status_code(403, "nope").is_auth_error());
        assert!(matches!(
            MediaServerError::from_status_code(404, "gone"),
            MediaServerError::NotFound(_)
        ));
        assert!(matches!(
            MediaServerError::from_status_code(502, "bad gateway"),
            MediaServerError::Api { code: 502, .. }
        ));
    }
}
