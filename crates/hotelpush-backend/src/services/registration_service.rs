use hotelpush_bridge::{
    MessageFromBackend,
    notification::{DeviceToken, NotificationType, RegistrationResult},
};

use crate::registrar::TokenRegistrar;

/// Handles a token registration request (see
/// [`hotelpush_bridge::MessageToBackend::RegisterDeviceToken`]).
pub async fn handle_register_device_token(
    context: super::AppContextHandle,
    token: DeviceToken,
    user_id: String,
) -> RegistrationResult {
    let registrar = {
        let state = context.state.read().await;
        TokenRegistrar::new(
            state.transport.clone(),
            &state.config.active_endpoints().registration_base_url,
        )
    };

    let result = registrar.register(&token, &user_id).await;
    if let RegistrationResult::Failure(message) = &result {
        context
            .send_notification(
                NotificationType::Error,
                format!("Unable to register device token: {message}"),
            )
            .await;
    }

    context
        .send(MessageFromBackend::RegistrationResponse(result.clone()))
        .await;
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hotelpush_bridge::config::Config;

    use super::*;
    use crate::{
        app::testing, permission::ConfiguredPermissionGate, transport::mock::RecordingTransport,
    };

    #[tokio::test]
    async fn registration_posts_to_configured_endpoint() {
        let config = Config::default();
        let gate = ConfiguredPermissionGate::from_config(&config.permission);
        let transport = Arc::new(RecordingTransport::replying(
            r#"{"success":true,"message":"Token updated"}"#,
        ));
        let dir = testing::scratch_dir();
        let (context, mut rx) = testing::context(
            config,
            testing::config_path(&dir),
            transport.clone(),
            Arc::new(gate),
        );

        let result =
            handle_register_device_token(context, DeviceToken::new("tok123"), "user1".into())
                .await;

        assert_eq!(result, RegistrationResult::Success("Token updated".into()));
        assert_eq!(
            transport.requests()[0].url,
            "http://hotelapp-web.herokuapp.com/updateUserToken"
        );
        assert!(matches!(
            rx.recv().await,
            Some(MessageFromBackend::RegistrationResponse(RegistrationResult::Success(_)))
        ));
    }
}
