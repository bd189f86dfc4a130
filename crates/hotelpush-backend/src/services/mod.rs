//! Backend service handlers for host-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (network, configuration) and report
//! results or status messages back to the host.

pub mod action_service;
pub mod config_service;
pub mod permission_service;
pub mod registration_service;
pub mod setup_service;
pub mod trigger_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
