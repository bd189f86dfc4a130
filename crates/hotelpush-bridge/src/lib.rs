//! Communication bridge between the host application and the notification
//! backend.
//!
//! This crate defines the types and protocols used to connect an application
//! shell (the part that owns the platform notification callbacks) with an
//! asynchronous backend responsible for permissions, device token
//! registration, push triggering and action routing.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The host sends commands (e.g., register a device token, dispatch a
//!   pressed notification button, request a push).
//! - The backend pushes events (e.g., registration results, trigger
//!   responses, status messages).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod config;
pub mod notification;

use std::collections::BTreeSet;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::notification::{
    ActionIdentifier, AuthorizationOutcome, Capability, Completion, DeviceToken,
    NotificationOption, NotificationPayload, PresentationOptions, RegistrationResult,
};

/// Messages emitted by the backend to inform the host of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic status message for the host application.
    NotificationMessage(notification::NotificationMessage),
    /// Response to the configuration request from the host.
    ConfigurationResponse(config::Config),
    /// Answer to a permission request.
    AuthorizationResponse(AuthorizationOutcome),
    /// The platform issued a device token.
    DeviceTokenObtained(DeviceToken),
    /// Outcome of registering a device token with the remote server.
    RegistrationResponse(RegistrationResult),
    /// Raw body returned by the remote trigger endpoint.
    TriggerResponse(String),
}

/// Commands issued by the host to control or query the backend.
#[derive(Debug)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Run the startup sequence: request the configured capabilities, obtain
    /// the device token and register it for the configured user.
    SetUpNotifications,
    /// Ask the user for the given capabilities.
    AuthorizationRequest(BTreeSet<Capability>),
    /// Ask the platform for a device token.
    DeviceTokenRequest,
    /// Register a token for a user on the remote server.
    RegisterDeviceToken {
        token: DeviceToken,
        user_id: String,
    },
    /// Ask the remote server to send a push with the given flags.
    TriggerRequest(Vec<NotificationOption>),
    /// The user pressed a notification button. `completion` is fired once the
    /// action has been handled.
    ActionReceived {
        action_id: ActionIdentifier,
        completion: Completion,
    },
    /// A notification arrived while the application is in the foreground.
    WillPresent {
        payload: NotificationPayload,
        completion: Completion<PresentationOptions>,
    },
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// the host and the backend.
pub struct BridgeChannels {
    /// Receiver used by the host to get messages from the backend.
    pub host_rx: Receiver<MessageFromBackend>,
    /// Sender used by the host to send commands to the backend.
    pub host_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the host.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the host.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_host_tx, to_host_rx) = mpsc::channel(buffer);
        Self {
            host_tx: to_backend_tx,
            host_rx: to_host_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_host_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
