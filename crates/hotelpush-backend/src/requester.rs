//! Asking the remote server to send a push to this device.

use std::sync::Arc;

use hotelpush_bridge::notification::NotificationOption;

use crate::{error::NotificationError, transport::Transport};

/// Path of the trigger endpoint, relative to its base URL.
pub const TRIGGER_PATH: &str = "/push";

/// Builds `<base>/push?` followed by `<token>=1&` for every option, in input
/// order. Duplicates are kept.
pub fn build_trigger_url(push_base_url: &str, options: &[NotificationOption]) -> String {
    let base = format!("{}{TRIGGER_PATH}?", push_base_url.trim_end_matches('/'));
    options.iter().fold(base, |mut url, option| {
        url.push_str(option.token());
        url.push_str("=1&");
        url
    })
}

#[derive(Debug, Clone)]
pub struct NotificationRequester {
    transport: Arc<dyn Transport>,
    push_base_url: String,
}

impl NotificationRequester {
    pub fn new(transport: Arc<dyn Transport>, push_base_url: impl Into<String>) -> Self {
        Self {
            transport,
            push_base_url: push_base_url.into(),
        }
    }

    /// Issues the trigger GET and returns the raw response text.
    pub async fn request_trigger(
        &self,
        options: &[NotificationOption],
    ) -> Result<String, NotificationError> {
        let url = build_trigger_url(&self.push_base_url, options);
        log::info!("Requesting notification with url: {url}");

        match self.transport.get_text(&url).await {
            Ok(body) => {
                log::info!("Trigger response: {body:?}");
                Ok(body)
            }
            Err(e) => {
                log::error!("Notification request to {url} failed: {e}");
                Err(e.into())
            }
        }
    }
}
