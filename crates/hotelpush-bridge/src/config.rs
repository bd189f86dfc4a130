use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::notification::{AuthorizationOutcome, Capability};

/// Deployment the backend talks to. Each one has its own set of endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Test,
    Staging,
    /// Default value.
    #[default]
    Production,
}

/// Base URLs of the remote notification server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointsConfig {
    /// Base of the trigger endpoint; `/push` is appended to it.
    pub push_base_url: String,
    /// Base of the token registration endpoint; `/updateUserToken` is
    /// appended to it.
    pub registration_base_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            push_base_url: "https://hotelapp-web.herokuapp.com".to_string(),
            registration_base_url: "http://hotelapp-web.herokuapp.com".to_string(),
        }
    }
}

/// Endpoints for every [`Environment`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnvironmentsConfig {
    pub test: Option<EndpointsConfig>,
    pub staging: Option<EndpointsConfig>,
    #[serde(default)]
    pub production: EndpointsConfig,
}

/// Permission-related settings. Missing fields take their default values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PermissionConfig {
    /// Capabilities requested at startup.
    pub requested_capabilities: BTreeSet<Capability>,
    /// Capabilities the desktop permission stand-in grants. A request for
    /// anything outside this set is denied.
    pub allowed_capabilities: BTreeSet<Capability>,
    /// Token the desktop permission stand-in hands out, if any.
    pub device_token: Option<String>,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        let all = BTreeSet::from([Capability::Alert, Capability::Sound, Capability::Badge]);
        Self {
            requested_capabilities: all.clone(),
            allowed_capabilities: all,
            device_token: None,
        }
    }
}

/// The last permission prompt shown to the user and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorizationRecord {
    pub capabilities: BTreeSet<Capability>,
    pub outcome: AuthorizationOutcome,
}

/// Global application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Which set of endpoints is active.
    #[serde(default)]
    pub environment: Environment,
    /// Identifier of the user the device token is registered for.
    pub user_id: String,
    #[serde(default)]
    pub endpoints: EnvironmentsConfig,
    #[serde(default)]
    pub permission: PermissionConfig,
    /// Written by the backend once the user answered a permission prompt.
    pub authorization: Option<AuthorizationRecord>,
}

impl Config {
    /// Endpoints of the active environment. Environments without their own
    /// table fall back to the production endpoints.
    pub fn active_endpoints(&self) -> &EndpointsConfig {
        let configured = match self.environment {
            Environment::Test => self.endpoints.test.as_ref(),
            Environment::Staging => self.endpoints.staging.as_ref(),
            Environment::Production => None,
        };
        configured.unwrap_or(&self.endpoints.production)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            user_id: "1".to_string(),
            endpoints: EnvironmentsConfig::default(),
            permission: PermissionConfig::default(),
            authorization: None,
        }
    }
}
