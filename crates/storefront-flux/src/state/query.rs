use serde::{Deserialize, Serialize};

/// Query text and the bridge's interpretation of it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// What the user typed; `None` means "no query"
    pub original: Option<String>,
    pub corrected: Option<String>,
    pub related: Vec<String>,
    pub did_you_mean: Vec<String>,
    pub rewrites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Selectable sorts; `selected` indexes into `items`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorts {
    pub selected: usize,
    pub items: Vec<Sort>,
}
