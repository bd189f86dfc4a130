use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Severity or category for host-visible status messages.
///
/// The backend uses these to report outcomes the host application may want
/// to surface (failed registrations, transport errors and so on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates a non-critical issue that the user should be aware of, but
    /// does not prevent normal operation.
    Warning,
    /// Indicates an error or failure that may affect functionality.
    Error,
}

/// A status message emitted by the backend for the host application.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    /// The type/severity of the message.
    pub notification_type: NotificationType,
    /// The text content to display or log.
    pub message: String,
}

/// Flags accepted by the remote trigger endpoint.
///
/// Each option is sent as a `<token>=1` query parameter, where the token is
/// the lowercase hyphenated form returned by [`NotificationOption::token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum NotificationOption {
    /// Lets a notification service extension modify the payload.
    #[serde(rename = "mutable-content")]
    MutableContent,
    /// Marks the push as a silent background update.
    #[serde(rename = "content-available")]
    ContentAvailable,
}

impl NotificationOption {
    pub const ALL: [NotificationOption; 2] = [Self::MutableContent, Self::ContentAvailable];

    /// Canonical query token of the option.
    pub fn token(self) -> &'static str {
        match self {
            Self::MutableContent => "mutable-content",
            Self::ContentAvailable => "content-available",
        }
    }
}

impl fmt::Display for NotificationOption {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.token())
    }
}

/// Returned when a string is not the token of any [`NotificationOption`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOptionError(pub String);

impl fmt::Display for UnknownOptionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unknown notification option {:?}", self.0)
    }
}

impl std::error::Error for UnknownOptionError {}

impl FromStr for NotificationOption {
    type Err = UnknownOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.token() == value)
            .ok_or_else(|| UnknownOptionError(value.to_string()))
    }
}

/// Identifier of a single user-facing notification button, e.g. `"yes1"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ActionIdentifier(String);

impl ActionIdentifier {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionIdentifier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for ActionIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActionIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::borrow::Borrow<str> for ActionIdentifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A button shown on a delivered notification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationAction {
    pub identifier: ActionIdentifier,
    /// Button label.
    pub title: String,
}

impl NotificationAction {
    pub fn new(identifier: impl Into<ActionIdentifier>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
        }
    }
}

/// Named group of actions registered together with the platform
/// notification subsystem. The order of `actions` is the button order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionCategory {
    pub identifier: String,
    pub actions: Vec<NotificationAction>,
}

impl ActionCategory {
    pub fn new(identifier: impl Into<String>, actions: Vec<NotificationAction>) -> Self {
        Self {
            identifier: identifier.into(),
            actions,
        }
    }
}

/// Opaque per-install token the platform issues to address pushes to this
/// device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DeviceToken(String);

impl DeviceToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Outcome of registering a [`DeviceToken`] with the remote server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationResult {
    /// The server accepted the token; carries the server's message.
    Success(String),
    /// The token was not registered; carries the server's message or a
    /// description of the transport failure.
    Failure(String),
}

impl RegistrationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }
}

/// A kind of user interruption a notification may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Alert,
    Sound,
    Badge,
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "alert" => Ok(Self::Alert),
            "sound" => Ok(Self::Sound),
            "badge" => Ok(Self::Badge),
            other => Err(format!("unknown capability {other:?}")),
        }
    }
}

/// Result of asking the user for notification permission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationOutcome {
    Granted,
    Denied,
    /// The platform could not complete the request.
    Error(String),
}

/// How a notification is presented while the application is in the
/// foreground.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentationOptions {
    pub alert: bool,
    pub sound: bool,
    pub badge: bool,
}

/// Opaque key/value payload of a delivered notification.
pub type NotificationPayload = BTreeMap<String, serde_json::Value>;

/// Single-shot signal the platform waits on after handing a notification
/// callback to the application.
///
/// Firing consumes the value, so a completion can never be signalled twice.
pub struct Completion<T = ()> {
    sender: oneshot::Sender<T>,
}

impl<T> Completion<T> {
    /// Creates a completion together with the receiver that observes it.
    pub fn new() -> (Self, oneshot::Receiver<T>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Signals the platform. A receiver that is already gone is ignored.
    pub fn complete(self, value: T) {
        let _ = self.sender.send(value);
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Completion")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_tokens_are_lowercase_hyphenated() {
        assert_eq!(NotificationOption::MutableContent.to_string(), "mutable-content");
        assert_eq!(NotificationOption::ContentAvailable.to_string(), "content-available");
    }

    #[test]
    fn option_parses_from_its_token() {
        for option in NotificationOption::ALL {
            assert_eq!(option.token().parse::<NotificationOption>(), Ok(option));
        }
        assert!("mutable_content".parse::<NotificationOption>().is_err());
    }

    #[test]
    fn option_serializes_as_token() {
        #[derive(Serialize)]
        struct Wrapper {
            options: Vec<NotificationOption>,
        }
        let text = toml::to_string(&Wrapper {
            options: vec![NotificationOption::ContentAvailable],
        })
        .unwrap();
        assert!(text.contains("\"content-available\""));
    }

    #[test]
    fn registration_result_exposes_message() {
        assert!(RegistrationResult::Success("ok".into()).is_success());
        assert_eq!(RegistrationResult::Failure("bad token".into()).message(), "bad token");
    }

    #[tokio::test]
    async fn completion_delivers_value_once() {
        let (completion, receiver) = Completion::new();
        completion.complete(PresentationOptions {
            alert: true,
            ..Default::default()
        });
        let options = receiver.await.unwrap();
        assert!(options.alert);
        assert!(!options.badge);
    }

    #[test]
    fn completion_ignores_dropped_receiver() {
        let (completion, receiver) = Completion::<()>::new();
        drop(receiver);
        completion.complete(());
    }
}
