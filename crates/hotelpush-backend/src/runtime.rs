//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, the action catalog, shared
//! state, and the message dispatch loop that listens to host bridge requests.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use hotelpush_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::{
    Mutex, RwLock,
    mpsc::{Receiver, Sender},
};
use tokio_util::task::TaskTracker;

use crate::app::AppContext;
use crate::catalog::{ActionCatalog, CatalogError, define_categories};
use crate::config::ConfigError;
use crate::dispatcher::ActionDispatcher;
use crate::permission::{ConfiguredPermissionGate, PermissionGate};
use crate::state::State;
use crate::transport::HttpTransport;

/// Errors that keep the backend from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The action catalog is inconsistent.
    #[error("invalid notification catalog: {0}")]
    Catalog(#[from] CatalogError),
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The async runtime could not be created.
    #[error("failed to build tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Spawn the backend runtime and begin processing bridge messages.
///
/// Everything that can make initialization fail (catalog validation,
/// configuration loading) happens before the backend thread is spawned, so
/// such errors are returned here instead of surfacing later. The returned
/// handle finishes once the host drops its sender.
pub fn run(
    rx: Receiver<MessageToBackend>,
    tx: Sender<MessageFromBackend>,
) -> Result<JoinHandle<()>, StartupError> {
    let catalog = ActionCatalog::new(define_categories())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;
    let (config, config_path) = runtime.block_on(crate::config::load_config())?;
    log::info!(
        "Using {:?} environment, endpoints {:?}",
        config.environment,
        config.active_endpoints()
    );

    let permission_gate = ConfiguredPermissionGate::from_config(&config.permission);
    permission_gate.register_categories(catalog.categories());

    let state = State {
        config,
        config_path,
        transport: Arc::new(HttpTransport::default()),
        permission_gate: Arc::new(permission_gate),
        dispatcher: Arc::new(ActionDispatcher::logging(&catalog)),
    };
    let context = Arc::new(AppContext {
        state: Arc::new(RwLock::new(state)),
        tx,
        tasks: TaskTracker::new(),
        authorization: Mutex::new(()),
    });

    Ok(thread::spawn(move || {
        runtime.block_on(async { context.consume_bridge_messages(rx).await });
    }))
}
