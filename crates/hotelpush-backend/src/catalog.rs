//! Notification categories and the buttons they carry.
//!
//! The catalog is built once at startup from [`define_categories`] and is
//! immutable afterwards. Every action identifier belongs to exactly one
//! category; a catalog that breaks this rule is rejected.

use std::collections::{HashMap, HashSet};

use hotelpush_bridge::notification::{ActionCategory, ActionIdentifier, NotificationAction};

/// Category of the first test notification.
pub const TEST_CATEGORY: &str = "com.CodeBurrow.HotelApp.notifications.test";
/// Category of the second test notification.
pub const TEST2_CATEGORY: &str = "com.CodeBurrow.HotelApp.notifications.test2";

/// Errors found while validating the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The same action identifier was registered twice.
    #[error("action `{action}` is registered in both `{first}` and `{second}`")]
    DuplicateAction {
        action: ActionIdentifier,
        first: String,
        second: String,
    },
    /// Two categories share an identifier.
    #[error("category `{0}` is defined more than once")]
    DuplicateCategory(String),
    /// A handler was bound to an identifier no category declares.
    #[error("action `{0}` is not part of any registered category")]
    UnknownAction(ActionIdentifier),
}

/// The categories the application registers with the platform.
pub fn define_categories() -> Vec<ActionCategory> {
    vec![
        ActionCategory::new(
            TEST_CATEGORY,
            vec![
                NotificationAction::new("yes1", "Yes 1"),
                NotificationAction::new("no1", "No 1"),
            ],
        ),
        ActionCategory::new(
            TEST2_CATEGORY,
            vec![
                NotificationAction::new("yes2", "Yes 2"),
                NotificationAction::new("no2", "No 2"),
            ],
        ),
    ]
}

/// Validated set of categories with an index from action identifier to its
/// position.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    categories: Vec<ActionCategory>,
    // (category index, action index)
    index: HashMap<ActionIdentifier, (usize, usize)>,
}

impl ActionCatalog {
    pub fn new(categories: Vec<ActionCategory>) -> Result<Self, CatalogError> {
        let mut seen_categories = HashSet::new();
        let mut index = HashMap::new();

        for (category_index, category) in categories.iter().enumerate() {
            if !seen_categories.insert(category.identifier.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.identifier.clone()));
            }

            for (action_index, action) in category.actions.iter().enumerate() {
                if let Some((first, _)) =
                    index.insert(action.identifier.clone(), (category_index, action_index))
                {
                    return Err(CatalogError::DuplicateAction {
                        action: action.identifier.clone(),
                        first: categories[first].identifier.clone(),
                        second: category.identifier.clone(),
                    });
                }
            }
        }

        Ok(Self { categories, index })
    }

    pub fn categories(&self) -> &[ActionCategory] {
        &self.categories
    }

    pub fn contains(&self, action_id: &str) -> bool {
        self.index.contains_key(action_id)
    }

    /// Returns the category that declares `action_id`.
    pub fn category_of(&self, action_id: &str) -> Option<&ActionCategory> {
        self.index
            .get(action_id)
            .map(|&(category, _)| &self.categories[category])
    }

    pub fn action(&self, action_id: &str) -> Option<&NotificationAction> {
        self.index
            .get(action_id)
            .map(|&(category, action)| &self.categories[category].actions[action])
    }

    pub fn title_of(&self, action_id: &str) -> Option<&str> {
        self.action(action_id).map(|action| action.title.as_str())
    }

    /// All actions in category order, then button order.
    pub fn actions(&self) -> impl Iterator<Item = &NotificationAction> {
        self.categories
            .iter()
            .flat_map(|category| category.actions.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_categories_are_valid() {
        let catalog = ActionCatalog::new(define_categories()).unwrap();
        assert_eq!(catalog.categories().len(), 2);
        assert_eq!(catalog.category_of("no2").unwrap().identifier, TEST2_CATEGORY);
        assert_eq!(catalog.title_of("yes1"), Some("Yes 1"));
        assert!(!catalog.contains("unknown_id"));
    }

    #[test]
    fn actions_keep_declaration_order() {
        let catalog = ActionCatalog::new(define_categories()).unwrap();
        let ids: Vec<&str> = catalog
            .actions()
            .map(|action| action.identifier.as_str())
            .collect();
        assert_eq!(ids, ["yes1", "no1", "yes2", "no2"]);
    }

    #[test]
    fn define_categories_is_deterministic() {
        assert_eq!(define_categories(), define_categories());
    }

    #[test]
    fn shared_identifier_across_categories_is_rejected() {
        let categories = vec![
            ActionCategory::new("first", vec![NotificationAction::new("yes1", "Yes")]),
            ActionCategory::new("second", vec![NotificationAction::new("yes1", "Yes again")]),
        ];
        assert_eq!(
            ActionCatalog::new(categories).unwrap_err(),
            CatalogError::DuplicateAction {
                action: "yes1".into(),
                first: "first".into(),
                second: "second".into(),
            }
        );
    }

    #[test]
    fn duplicate_within_one_category_is_rejected() {
        let categories = vec![ActionCategory::new(
            "only",
            vec![
                NotificationAction::new("no1", "No"),
                NotificationAction::new("no1", "No"),
            ],
        )];
        assert!(matches!(
            ActionCatalog::new(categories),
            Err(CatalogError::DuplicateAction { .. })
        ));
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let categories = vec![
            ActionCategory::new("same", vec![NotificationAction::new("a", "A")]),
            ActionCategory::new("same", vec![NotificationAction::new("b", "B")]),
        ];
        assert_eq!(
            ActionCatalog::new(categories).unwrap_err(),
            CatalogError::DuplicateCategory("same".into())
        );
    }
}
