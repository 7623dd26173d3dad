//! Error types for the backend service.

use redis::{ErrorKind, RedisError};
use thiserror::Error;

/// Classified outcome of a failed Redis connection attempt.
///
/// Classification uses the client library's structured error kind rather
/// than matching substrings of the error message, so it survives wording
/// changes across server and library versions.
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// The server requires a password and none (or a wrong one) was supplied.
    #[error("redis authentication required: {0}")]
    AuthRequired(#[source] RedisError),

    /// Any other failure while establishing the connection.
    #[error("redis connection failed: {0}")]
    Connection(#[source] RedisError),
}

impl ConnectorError {
    /// Classify an error from the connection attempt.
    pub fn from_redis(err: RedisError) -> Self {
        // The NOAUTH reply code is the server-side spelling of the same
        // condition; older library versions surface it without mapping the
        // kind.
        if err.kind() == ErrorKind::AuthenticationFailed || err.code() == Some("NOAUTH") {
            ConnectorError::AuthRequired(err)
        } else {
            ConnectorError::Connection(err)
        }
    }

    /// True when the remediation is supplying `REDIS_PASSWORD`.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, ConnectorError::AuthRequired(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noauth_reply_classifies_as_auth_required() {
        let err = RedisError::from((
            ErrorKind::AuthenticationFailed,
            "NOAUTH",
            "Authentication required.".to_string(),
        ));

        let classified = ConnectorError::from_redis(err);
        assert!(classified.is_auth_required());
    }

    #[test]
    fn refused_connection_classifies_as_generic() {
        let err = RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));

        let classified = ConnectorError::from_redis(err);
        assert!(!classified.is_auth_required());
    }

    #[test]
    fn display_includes_the_underlying_message() {
        let err = RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));

        let classified = ConnectorError::from_redis(err);
        assert!(classified.to_string().contains("connection refused"));
    }
}
