use hotelpush_bridge::notification::ActionIdentifier;

use crate::catalog::CatalogError;
use crate::permission::TokenError;
use crate::transport::TransportError;

/// Failures of the notification operations.
///
/// None of these are retried by the backend; they are logged and reported to
/// the host. [`NotificationError::Configuration`] is the only variant that
/// stops the backend from starting.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// The user refused the notification permission.
    #[error("notification permission was denied")]
    PermissionDenied,
    /// The request never produced a usable response.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),
    /// The server answered with something other than an acceptance.
    #[error("server rejected the request: {0}")]
    ServerRejection(String),
    /// The action catalog is inconsistent.
    #[error("invalid notification configuration: {0}")]
    Configuration(#[from] CatalogError),
    /// A pressed button has no registered action.
    #[error("unrecognized notification action `{0}`")]
    UnrecognizedAction(ActionIdentifier),
    /// The platform could not issue a device token.
    #[error("failed to obtain device token: {0}")]
    Token(TokenError),
}

impl From<TokenError> for NotificationError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::UserDenied => Self::PermissionDenied,
            other => Self::Token(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_denied_token_maps_to_permission_denied() {
        let error = NotificationError::from(TokenError::UserDenied);
        assert!(matches!(error, NotificationError::PermissionDenied));
    }

    #[test]
    fn platform_token_failure_keeps_reason() {
        let error = NotificationError::from(TokenError::Platform("no entitlement".into()));
        assert_eq!(
            error.to_string(),
            "failed to obtain device token: platform registration failed: no entitlement"
        );
    }

    #[test]
    fn unrecognized_action_names_identifier() {
        let error = NotificationError::UnrecognizedAction("maybe".into());
        assert_eq!(error.to_string(), "unrecognized notification action `maybe`");
    }
}
