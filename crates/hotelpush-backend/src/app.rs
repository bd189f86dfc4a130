//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses and status messages back to the host bridge.

use std::sync::Arc;

use hotelpush_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::{
    Mutex,
    mpsc::{Receiver, Sender},
};
use tokio_util::task::TaskTracker;

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the host bridge.
    pub tx: Sender<MessageFromBackend>,
    /// Network-bound requests still in flight.
    pub tasks: TaskTracker,
    /// Held from reading the saved authorization answer until the new one is
    /// stored, so overlapping requests prompt at most once.
    pub authorization: Mutex<()>,
}

impl AppContext {
    /// Read and dispatch messages from the host bridge until it closes, then
    /// wait for the requests already issued to run to completion.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a host message: {message:?}");
            self.dispatch_message(message).await;
        }

        self.tasks.close();
        log::info!(
            "Host bridge closed, waiting for {} request(-s) in flight",
            self.tasks.len()
        );
        self.tasks.wait().await;
    }

    /// Dispatches the received message from the host down to individual
    /// service handlers.
    ///
    /// Button actions and presentation queries are answered inline so their
    /// completions fire before the next message is read. Network-bound
    /// requests run as independent tasks.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::SetUpNotifications => {
                self.tasks.spawn(services::setup_service::handle_setup(self.clone()));
            }
            MessageToBackend::AuthorizationRequest(capabilities) => {
                self.tasks.spawn(services::permission_service::handle_authorization_request(
                    self.clone(),
                    capabilities,
                ));
            }
            MessageToBackend::DeviceTokenRequest => {
                self.tasks.spawn(services::permission_service::handle_device_token_request(
                    self.clone(),
                ));
            }
            MessageToBackend::RegisterDeviceToken { token, user_id } => {
                self.tasks.spawn(
                    services::registration_service::handle_register_device_token(
                        self.clone(),
                        token,
                        user_id,
                    ),
                );
            }
            MessageToBackend::TriggerRequest(options) => {
                self.tasks.spawn(services::trigger_service::handle_trigger_request(
                    self.clone(),
                    options,
                ));
            }
            MessageToBackend::ActionReceived {
                action_id,
                completion,
            } => {
                services::action_service::handle_action(self.clone(), action_id, completion).await;
            }
            MessageToBackend::WillPresent {
                payload,
                completion,
            } => {
                services::action_service::handle_will_present(self.clone(), payload, completion)
                    .await;
            }
        }
    }

    /// Send a message to the host bridge. A closed bridge is logged and the
    /// message dropped.
    pub async fn send(&self, message: MessageFromBackend) {
        if let Err(e) = self.tx.send(message).await {
            log::warn!("Failed to send message to host: {e}");
        }
    }

    /// Send a status message to the host bridge.
    pub async fn send_notification(
        &self,
        notification_type: hotelpush_bridge::notification::NotificationType,
        content: impl Into<String>,
    ) {
        self.send(MessageFromBackend::NotificationMessage(
            hotelpush_bridge::notification::NotificationMessage {
                notification_type,
                message: content.into(),
            },
        ))
        .await;
    }
}
