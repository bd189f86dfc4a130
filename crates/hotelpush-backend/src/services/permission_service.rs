use std::collections::BTreeSet;

use hotelpush_bridge::{
    MessageFromBackend,
    notification::{AuthorizationOutcome, Capability, DeviceToken, NotificationType},
};

use crate::{error::NotificationError, permission};

/// Handles a permission request (see
/// [`hotelpush_bridge::MessageToBackend::AuthorizationRequest`]).
///
/// The answer is persisted so that the same set of capabilities is never
/// prompted for twice.
pub async fn handle_authorization_request(
    context: super::AppContextHandle,
    capabilities: BTreeSet<Capability>,
) -> AuthorizationOutcome {
    let prompting = context.authorization.lock().await;
    let (gate, previous) = {
        let state = context.state.read().await;
        (
            state.permission_gate.clone(),
            state.config.authorization.clone(),
        )
    };

    let decision = permission::authorize(gate.as_ref(), previous.as_ref(), &capabilities).await;

    if let Some(record) = decision.new_record {
        let (config_path, config) = {
            let mut state = context.state.write().await;
            state.config.authorization = Some(record);
            (state.config_path.clone(), state.config.clone())
        };
        // the answer stays in memory when the write fails
        if let Err(e) = crate::config::save_config(&config_path, &config).await {
            log::error!("Failed to persist authorization answer: {e}");
        }
    }
    drop(prompting);

    match &decision.outcome {
        AuthorizationOutcome::Granted => {}
        AuthorizationOutcome::Denied => {
            log::warn!("{}", NotificationError::PermissionDenied);
            context
                .send_notification(
                    NotificationType::Warning,
                    NotificationError::PermissionDenied.to_string(),
                )
                .await;
        }
        AuthorizationOutcome::Error(reason) => {
            log::error!("Authorization request failed: {reason}");
            context
                .send_notification(NotificationType::Error, reason.clone())
                .await;
        }
    }

    context
        .send(MessageFromBackend::AuthorizationResponse(
            decision.outcome.clone(),
        ))
        .await;
    decision.outcome
}

/// Handles a device token request (see
/// [`hotelpush_bridge::MessageToBackend::DeviceTokenRequest`]).
pub async fn handle_device_token_request(context: super::AppContextHandle) -> Option<DeviceToken> {
    let gate = context.state.read().await.permission_gate.clone();

    match gate.obtain_device_token().await {
        Ok(token) => {
            log::info!("Obtained device token {token}");
            context
                .send(MessageFromBackend::DeviceTokenObtained(token.clone()))
                .await;
            Some(token)
        }
        Err(e) => {
            let error = NotificationError::from(e);
            log::error!("Failed to register for remote notifications: {error}");
            context
                .send_notification(NotificationType::Error, error.to_string())
                .await;
            None
        }
    }
}
