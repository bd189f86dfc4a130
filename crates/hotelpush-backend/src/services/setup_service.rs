use hotelpush_bridge::notification::AuthorizationOutcome;

use super::{permission_service, registration_service};

/// Handles the startup sequence (see
/// [`hotelpush_bridge::MessageToBackend::SetUpNotifications`]): request the
/// configured capabilities, obtain a device token and register it for the
/// configured user.
///
/// Each step reports its own outcome; the sequence stops at the first one
/// that fails and nothing is retried.
pub async fn handle_setup(context: super::AppContextHandle) {
    let (capabilities, user_id) = {
        let state = context.state.read().await;
        (
            state.config.permission.requested_capabilities.clone(),
            state.config.user_id.clone(),
        )
    };

    let outcome =
        permission_service::handle_authorization_request(context.clone(), capabilities).await;
    if outcome != AuthorizationOutcome::Granted {
        log::info!("Skipping device token registration, authorization is {outcome:?}");
        return;
    }

    let Some(token) = permission_service::handle_device_token_request(context.clone()).await else {
        return;
    };

    registration_service::handle_register_device_token(context, token, user_id).await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hotelpush_bridge::{
        MessageFromBackend,
        config::{Config, PermissionConfig},
        notification::RegistrationResult,
    };

    use super::*;
    use crate::{
        app::testing, permission::ConfiguredPermissionGate, transport::mock::RecordingTransport,
    };

    #[tokio::test]
    async fn full_setup_registers_configured_token() {
        let config = Config {
            user_id: "user1".into(),
            permission: PermissionConfig {
                device_token: Some("tok123".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let gate = ConfiguredPermissionGate::from_config(&config.permission);
        let transport = Arc::new(RecordingTransport::replying(r#"{"success":true,"message":"ok"}"#));
        let dir = testing::scratch_dir();
        let (context, mut rx) = testing::context(
            config,
            testing::config_path(&dir),
            transport.clone(),
            Arc::new(gate),
        );

        handle_setup(context).await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({"user_id": "user1", "user_token": "tok123"}))
        );

        let mut messages = Vec::new();
        while let Ok(message) = rx.try_recv() {
            messages.push(message);
        }
        assert!(matches!(
            messages.last(),
            Some(MessageFromBackend::RegistrationResponse(RegistrationResult::Success(_)))
        ));
    }

    #[tokio::test]
    async fn denied_permission_skips_registration() {
        let config = Config {
            permission: PermissionConfig {
                allowed_capabilities: Default::default(),
                device_token: Some("tok123".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let gate = ConfiguredPermissionGate::from_config(&config.permission);
        let transport = Arc::new(RecordingTransport::replying(r#"{"success":true,"message":"ok"}"#));
        let dir = testing::scratch_dir();
        let (context, _rx) = testing::context(
            config,
            testing::config_path(&dir),
            transport.clone(),
            Arc::new(gate),
        );

        handle_setup(context).await;

        assert!(transport.requests().is_empty());
    }
}
