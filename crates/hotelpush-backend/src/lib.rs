//! Backend runtime entry point and public API surface.
//!
//! This crate owns the notification module: the action catalog, permission
//! and device token handling, token registration, push triggering and action
//! routing. The runtime routes bridge messages to services and manages the
//! shared state used by asynchronous tasks.

mod app;
mod runtime;
mod services;
mod state;

pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod permission;
pub mod registrar;
pub mod requester;
pub mod transport;

pub use crate::error::NotificationError;
pub use crate::runtime::{StartupError, run};
