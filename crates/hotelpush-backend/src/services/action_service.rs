use hotelpush_bridge::notification::{
    ActionIdentifier, Completion, NotificationPayload, PresentationOptions,
};

/// Handles a pressed notification button (see
/// [`hotelpush_bridge::MessageToBackend::ActionReceived`]). The completion is
/// always fired, whether or not the action is known.
pub async fn handle_action(
    context: super::AppContextHandle,
    action_id: ActionIdentifier,
    completion: Completion,
) {
    let dispatcher = context.state.read().await.dispatcher.clone();
    dispatcher.dispatch(&action_id, completion);
}

/// Handles a notification delivered while the application is in the
/// foreground.
pub async fn handle_will_present(
    context: super::AppContextHandle,
    payload: NotificationPayload,
    completion: Completion<PresentationOptions>,
) {
    let dispatcher = context.state.read().await.dispatcher.clone();
    dispatcher.will_present(&payload, completion);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hotelpush_bridge::config::Config;

    use super::*;
    use crate::{
        app::testing, dispatcher::FOREGROUND_PRESENTATION,
        permission::ConfiguredPermissionGate, transport::mock::RecordingTransport,
    };

    fn context(dir: &tempfile::TempDir) -> crate::services::AppContextHandle {
        let config = Config::default();
        let gate = ConfiguredPermissionGate::from_config(&config.permission);
        let (context, _rx) = testing::context(
            config,
            testing::config_path(dir),
            Arc::new(RecordingTransport::replying("")),
            Arc::new(gate),
        );
        context
    }

    #[tokio::test]
    async fn known_and_unknown_actions_complete() {
        let dir = testing::scratch_dir();
        let context = context(&dir);
        for action in ["yes1", "no2", "unknown_id"] {
            let (completion, receiver) = Completion::new();
            handle_action(context.clone(), action.into(), completion).await;
            assert_eq!(receiver.await, Ok(()));
        }
    }

    #[tokio::test]
    async fn will_present_answers_fixed_options() {
        let dir = testing::scratch_dir();
        let (completion, receiver) = Completion::new();
        handle_will_present(context(&dir), NotificationPayload::new(), completion).await;
        assert_eq!(receiver.await, Ok(FOREGROUND_PRESENTATION));
    }
}
