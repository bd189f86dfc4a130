use std::{path::PathBuf, sync::Arc};

use crate::{dispatcher::ActionDispatcher, permission::PermissionGate, transport::Transport};

/// The core application state that holds configuration and the collaborators
/// the notification operations run against.
///
/// Everything here is wired once at startup and shared across async tasks
/// (see [`SharedState`]). Only the configuration is ever written afterwards.
#[derive(Debug, Clone)]
pub struct State {
    /// The loaded application configuration.
    pub config: hotelpush_bridge::config::Config,
    /// Where the configuration is persisted.
    pub config_path: PathBuf,
    /// Shared HTTP transport for registration and trigger requests.
    pub transport: Arc<dyn Transport>,
    /// Platform permission and token provider.
    pub permission_gate: Arc<dyn PermissionGate>,
    /// Routing table for pressed notification buttons.
    pub dispatcher: Arc<ActionDispatcher>,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
pub type SharedState = Arc<tokio::sync::RwLock<State>>;
