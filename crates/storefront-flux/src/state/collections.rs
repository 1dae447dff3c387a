use super::Indexed;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    /// Record count, fetched lazily
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total: None,
        }
    }
}

/// Searchable collections and the one currently selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collections {
    pub selected: String,
    pub items: Indexed<Collection>,
}

impl Collections {
    pub fn new(selected: impl Into<String>, names: impl IntoIterator<Item = String>) -> Self {
        Self {
            selected: selected.into(),
            items: Indexed::from_entries(
                names
                    .into_iter()
                    .map(|name| (name.clone(), Collection::new(name))),
            ),
        }
    }
}
