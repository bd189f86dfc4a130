//! Registration of the device token with the remote notification server.

use std::sync::Arc;

use hotelpush_bridge::notification::{DeviceToken, RegistrationResult};
use serde::Deserialize;

use crate::{error::NotificationError, transport::Transport};

/// Path of the registration endpoint, relative to its base URL.
pub const REGISTRATION_PATH: &str = "/updateUserToken";

/// Body the server answers a registration with.
#[derive(Debug, Deserialize)]
struct RegistrationResponse {
    success: Option<bool>,
    message: Option<String>,
}

/// Decodes a registration response body.
///
/// A missing `success` counts as a rejection and a missing `message` as an
/// empty one. Anything that is not an object with a boolean `success` and a
/// string `message` is a [`NotificationError::ServerRejection`].
pub fn decode_registration(body: &str) -> Result<RegistrationResult, NotificationError> {
    let response: RegistrationResponse = serde_json::from_str(body).map_err(|e| {
        NotificationError::ServerRejection(format!("malformed registration response: {e}"))
    })?;

    let message = response.message.unwrap_or_default();
    Ok(match response.success {
        Some(true) => RegistrationResult::Success(message),
        Some(false) | None => RegistrationResult::Failure(message),
    })
}

/// Sends device tokens to `<base>/updateUserToken`.
///
/// Every call is an independent request; nothing is retried or deduplicated.
#[derive(Debug, Clone)]
pub struct TokenRegistrar {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl TokenRegistrar {
    pub fn new(transport: Arc<dyn Transport>, registration_base_url: &str) -> Self {
        Self {
            transport,
            endpoint: format!(
                "{}{REGISTRATION_PATH}",
                registration_base_url.trim_end_matches('/')
            ),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Registers `token` for `user_id`. Failures of any kind are logged and
    /// folded into [`RegistrationResult::Failure`].
    pub async fn register(&self, token: &DeviceToken, user_id: &str) -> RegistrationResult {
        let result = match self.try_register(token, user_id).await {
            Ok(result) => result,
            Err(e) => RegistrationResult::Failure(e.to_string()),
        };

        match &result {
            RegistrationResult::Success(message) => {
                log::info!("Registered device token for user {user_id} with response: {message:?}")
            }
            RegistrationResult::Failure(message) => {
                log::error!("Unable to register device token for user {user_id}: {message:?}")
            }
        }
        result
    }

    async fn try_register(
        &self,
        token: &DeviceToken,
        user_id: &str,
    ) -> Result<RegistrationResult, NotificationError> {
        let body = serde_json::json!({
            "user_id": user_id,
            "user_token": token.as_str(),
        });
        log::debug!("Posting device token to {}", self.endpoint);

        let response = self.transport.post_json(&self.endpoint, &body).await?;
        decode_registration(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::RecordingTransport;

    fn registrar(transport: &Arc<RecordingTransport>) -> TokenRegistrar {
        TokenRegistrar::new(transport.clone(), "https://push.example.com/")
    }

    #[tokio::test]
    async fn accepted_registration_is_success() {
        let transport = Arc::new(RecordingTransport::replying(
            r#"{"success":true,"message":"ok"}"#,
        ));
        let result = registrar(&transport)
            .register(&DeviceToken::new("tok123"), "user1")
            .await;
        assert_eq!(result, RegistrationResult::Success("ok".into()));
    }

    #[tokio::test]
    async fn rejected_registration_carries_server_message() {
        let transport = Arc::new(RecordingTransport::replying(
            r#"{"success":false,"message":"bad token"}"#,
        ));
        let result = registrar(&transport)
            .register(&DeviceToken::new("tok123"), "user1")
            .await;
        assert_eq!(result, RegistrationResult::Failure("bad token".into()));
    }

    #[tokio::test]
    async fn request_body_has_exactly_user_fields() {
        let transport = Arc::new(RecordingTransport::replying(r#"{"success":true,"message":""}"#));
        registrar(&transport)
            .register(&DeviceToken::new("tok123"), "user1")
            .await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "https://push.example.com/updateUserToken");
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({"user_id": "user1", "user_token": "tok123"}))
        );
    }

    #[tokio::test]
    async fn transport_failure_is_reported_once_without_retry() {
        let transport = Arc::new(RecordingTransport::failing(503));
        let result = registrar(&transport)
            .register(&DeviceToken::new("tok123"), "user1")
            .await;

        assert!(!result.is_success());
        assert!(!result.message().is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn repeated_registration_issues_independent_requests() {
        let transport = Arc::new(RecordingTransport::replying(r#"{"success":true,"message":"ok"}"#));
        let registrar = registrar(&transport);
        let token = DeviceToken::new("tok123");
        registrar.register(&token, "user1").await;
        registrar.register(&token, "user1").await;
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn missing_success_is_failure_with_message() {
        assert_eq!(
            decode_registration(r#"{"message":"who are you"}"#).unwrap(),
            RegistrationResult::Failure("who are you".into())
        );
    }

    #[test]
    fn missing_message_is_empty() {
        assert_eq!(
            decode_registration(r#"{"success":false}"#).unwrap(),
            RegistrationResult::Failure(String::new())
        );
    }

    #[test]
    fn mistyped_fields_are_server_rejections() {
        for body in [r#"{"success":"yes","message":"ok"}"#, r#"{"success":true,"message":5}"#] {
            assert!(matches!(
                decode_registration(body),
                Err(NotificationError::ServerRejection(_))
            ));
        }
    }

    #[test]
    fn non_json_body_is_server_rejection() {
        let error = decode_registration("<html>Application Error</html>").unwrap_err();
        assert!(error.to_string().contains("malformed registration response"));
    }
}
