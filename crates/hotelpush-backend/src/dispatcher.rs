//! Routing of pressed notification buttons to application handlers.

use std::collections::HashMap;

use hotelpush_bridge::notification::{
    ActionIdentifier, Completion, NotificationPayload, PresentationOptions,
};

use crate::{
    catalog::{ActionCatalog, CatalogError},
    error::NotificationError,
};

/// Handler invoked with the identifier of the pressed button.
pub type ActionHandler = Box<dyn Fn(&ActionIdentifier) + Send + Sync>;

/// Directives used for every notification shown in the foreground.
pub const FOREGROUND_PRESENTATION: PresentationOptions = PresentationOptions {
    alert: true,
    sound: true,
    badge: false,
};

fn log_unrecognized(action_id: &ActionIdentifier) {
    log::warn!("{}", NotificationError::UnrecognizedAction(action_id.clone()));
}

/// Static routing table from action identifier to handler.
///
/// Identifiers not in the table go to the default handler, which only logs.
pub struct ActionDispatcher {
    catalog: ActionCatalog,
    routes: HashMap<ActionIdentifier, ActionHandler>,
    default_handler: ActionHandler,
}

impl ActionDispatcher {
    /// Creates a dispatcher whose handlers log `"<title> button pressed"` for
    /// every action of `catalog`.
    pub fn logging(catalog: &ActionCatalog) -> Self {
        let routes = catalog
            .actions()
            .map(|action| {
                let title = action.title.clone();
                let handler: ActionHandler =
                    Box::new(move |_: &ActionIdentifier| log::info!("{title} button pressed"));
                (action.identifier.clone(), handler)
            })
            .collect();

        Self {
            catalog: catalog.clone(),
            routes,
            default_handler: Box::new(log_unrecognized),
        }
    }

    /// Replaces the handler of `action_id`, which must be declared by the
    /// catalog.
    pub fn on(
        mut self,
        action_id: impl Into<ActionIdentifier>,
        handler: impl Fn(&ActionIdentifier) + Send + Sync + 'static,
    ) -> Result<Self, CatalogError> {
        let action_id = action_id.into();
        if !self.catalog.contains(action_id.as_str()) {
            return Err(CatalogError::UnknownAction(action_id));
        }
        self.routes.insert(action_id, Box::new(handler));
        Ok(self)
    }

    /// Replaces the handler for unregistered identifiers.
    pub fn with_default(
        mut self,
        handler: impl Fn(&ActionIdentifier) + Send + Sync + 'static,
    ) -> Self {
        self.default_handler = Box::new(handler);
        self
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    /// Runs the handler of `action_id`, then fires `completion`.
    pub fn dispatch(&self, action_id: &ActionIdentifier, completion: Completion) {
        log::debug!("Dispatching notification action {action_id}");
        let handler = self.routes.get(action_id).unwrap_or(&self.default_handler);
        handler(action_id);
        completion.complete(());
    }

    /// Answers how a notification arriving in the foreground is presented.
    /// The payload is only logged.
    pub fn will_present(
        &self,
        payload: &NotificationPayload,
        completion: Completion<PresentationOptions>,
    ) {
        log::info!("Notification received with payload: {payload:?}");
        completion.complete(FOREGROUND_PRESENTATION);
    }
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<&str> = self.routes.keys().map(ActionIdentifier::as_str).collect();
        routes.sort_unstable();
        formatter
            .debug_struct("ActionDispatcher")
            .field("routes", &routes)
            .finish_non_exhaustive()
    }
}
