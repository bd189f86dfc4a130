use hotelpush_bridge::{
    MessageFromBackend,
    notification::{NotificationOption, NotificationType},
};

use crate::requester::NotificationRequester;

/// Handles an incoming push trigger request (see
/// [`hotelpush_bridge::MessageToBackend::TriggerRequest`]).
pub async fn handle_trigger_request(
    context: super::AppContextHandle,
    options: Vec<NotificationOption>,
) {
    let requester = {
        let state = context.state.read().await;
        NotificationRequester::new(
            state.transport.clone(),
            state.config.active_endpoints().push_base_url.clone(),
        )
    };

    match requester.request_trigger(&options).await {
        Ok(body) => context.send(MessageFromBackend::TriggerResponse(body)).await,
        Err(e) => {
            context
                .send_notification(NotificationType::Error, e.to_string())
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hotelpush_bridge::config::{Config, EndpointsConfig, Environment};

    use super::*;
    use crate::{
        app::testing, permission::ConfiguredPermissionGate, transport::mock::RecordingTransport,
    };

    #[tokio::test]
    async fn trigger_uses_active_environment() {
        let mut config = Config {
            environment: Environment::Test,
            ..Default::default()
        };
        config.endpoints.test = Some(EndpointsConfig {
            push_base_url: "http://localhost:5000".into(),
            registration_base_url: "http://localhost:5000".into(),
        });
        let transport = Arc::new(RecordingTransport::replying("Successful Delivery!\n"));
        let gate = ConfiguredPermissionGate::from_config(&config.permission);
        let dir = testing::scratch_dir();
        let (context, mut rx) = testing::context(
            config,
            testing::config_path(&dir),
            transport.clone(),
            Arc::new(gate),
        );

        handle_trigger_request(context, vec![NotificationOption::ContentAvailable]).await;

        assert_eq!(
            transport.requests()[0].url,
            "http://localhost:5000/push?content-available=1&"
        );
        match rx.recv().await {
            Some(MessageFromBackend::TriggerResponse(body)) => {
                assert_eq!(body, "Successful Delivery!\n")
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[tokio::test]
    async fn trigger_failure_is_reported_as_error() {
        let config = Config::default();
        let gate = ConfiguredPermissionGate::from_config(&config.permission);
        let dir = testing::scratch_dir();
        let (context, mut rx) = testing::context(
            config,
            testing::config_path(&dir),
            Arc::new(RecordingTransport::failing(502)),
            Arc::new(gate),
        );

        handle_trigger_request(context, Vec::new()).await;

        match rx.recv().await {
            Some(MessageFromBackend::NotificationMessage(message)) => {
                assert_eq!(message.notification_type, NotificationType::Error);
                assert!(message.message.contains("502"));
            }
            other => panic!("unexpected message {other:?}"),
        }
    }
}
