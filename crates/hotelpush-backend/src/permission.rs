//! Notification permission and device token acquisition.
//!
//! The platform side lives behind [`PermissionGate`]. [`authorize`] adds the
//! "prompt at most once per capability set" rule on top of any gate.

use std::collections::BTreeSet;

use async_trait::async_trait;
use hotelpush_bridge::{
    config::{AuthorizationRecord, PermissionConfig},
    notification::{ActionCategory, AuthorizationOutcome, Capability, DeviceToken},
};

/// Reasons the platform can fail to issue a device token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("network unavailable")]
    NetworkUnavailable,
    #[error("user denied remote notifications")]
    UserDenied,
    #[error("platform registration failed: {0}")]
    Platform(String),
}

/// Platform notification subsystem as seen by the backend.
///
/// Implementations report failures as they are; retrying is left to callers.
#[async_trait]
pub trait PermissionGate: Send + Sync + std::fmt::Debug {
    /// Shows the permission prompt for `capabilities` and reports the answer.
    async fn request_authorization(
        &self,
        capabilities: &BTreeSet<Capability>,
    ) -> AuthorizationOutcome;

    /// Registers for remote notifications and returns the issued token.
    async fn obtain_device_token(&self) -> Result<DeviceToken, TokenError>;

    /// Hands the action categories to the platform. Called once at startup.
    fn register_categories(&self, categories: &[ActionCategory]);
}

/// Result of [`authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationDecision {
    pub outcome: AuthorizationOutcome,
    /// Record to persist, when the user was actually prompted.
    pub new_record: Option<AuthorizationRecord>,
}

/// Requests `capabilities`, reusing the answer in `previous` when the user
/// was already prompted for exactly the same set.
///
/// Errors are not recorded, so the next request prompts again.
pub async fn authorize(
    gate: &dyn PermissionGate,
    previous: Option<&AuthorizationRecord>,
    capabilities: &BTreeSet<Capability>,
) -> AuthorizationDecision {
    if let Some(record) = previous.filter(|record| &record.capabilities == capabilities) {
        log::debug!("Reusing authorization answer {:?} for {capabilities:?}", record.outcome);
        return AuthorizationDecision {
            outcome: record.outcome.clone(),
            new_record: None,
        };
    }

    let outcome = gate.request_authorization(capabilities).await;
    log::info!("Authorization for {capabilities:?} answered with {outcome:?}");

    let new_record = match outcome {
        AuthorizationOutcome::Error(_) => None,
        ref answered => Some(AuthorizationRecord {
            capabilities: capabilities.clone(),
            outcome: answered.clone(),
        }),
    };

    AuthorizationDecision {
        outcome,
        new_record,
    }
}

/// Desktop stand-in for the platform gate, driven by [`PermissionConfig`].
#[derive(Debug, Clone)]
pub struct ConfiguredPermissionGate {
    allowed: BTreeSet<Capability>,
    device_token: Option<DeviceToken>,
}

impl ConfiguredPermissionGate {
    pub fn new(allowed: BTreeSet<Capability>, device_token: Option<DeviceToken>) -> Self {
        Self {
            allowed,
            device_token,
        }
    }

    pub fn from_config(config: &PermissionConfig) -> Self {
        Self::new(
            config.allowed_capabilities.clone(),
            config.device_token.clone().map(DeviceToken::new),
        )
    }
}

#[async_trait]
impl PermissionGate for ConfiguredPermissionGate {
    async fn request_authorization(
        &self,
        capabilities: &BTreeSet<Capability>,
    ) -> AuthorizationOutcome {
        if capabilities.is_subset(&self.allowed) {
            AuthorizationOutcome::Granted
        } else {
            AuthorizationOutcome::Denied
        }
    }

    async fn obtain_device_token(&self) -> Result<DeviceToken, TokenError> {
        self.device_token
            .clone()
            .ok_or_else(|| TokenError::Platform("no device token configured".to_string()))
    }

    fn register_categories(&self, categories: &[ActionCategory]) {
        for category in categories {
            log::info!(
                "Registered notification category {} with {} action(-s)",
                category.identifier,
                category.actions.len()
            );
        }
    }
}
