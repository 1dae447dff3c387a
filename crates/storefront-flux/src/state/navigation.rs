//! Navigations (facets) and their refinements

use serde::{Deserialize, Serialize};

/// How refinements of a navigation are compared and sent to the bridge
///
/// Derived from the owning navigation's `range` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefinementKind {
    Value,
    Range,
}

impl RefinementKind {
    pub fn from_range(range: bool) -> Self {
        if range {
            RefinementKind::Range
        } else {
            RefinementKind::Value
        }
    }
}

/// One concrete filter within a navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Refinement {
    Range {
        low: f64,
        high: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total: Option<u64>,
    },
    Value {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total: Option<u64>,
    },
}

impl Refinement {
    pub fn value(value: impl Into<String>) -> Self {
        Refinement::Value {
            value: value.into(),
            total: None,
        }
    }

    pub fn range(low: f64, high: f64) -> Self {
        Refinement::Range {
            low,
            high,
            total: None,
        }
    }

    pub fn with_total(self, count: u64) -> Self {
        match self {
            Refinement::Value { value, .. } => Refinement::Value {
                value,
                total: Some(count),
            },
            Refinement::Range { low, high, .. } => Refinement::Range {
                low,
                high,
                total: Some(count),
            },
        }
    }

    pub fn total(&self) -> Option<u64> {
        match self {
            Refinement::Value { total, .. } | Refinement::Range { total, .. } => *total,
        }
    }

    pub fn kind(&self) -> RefinementKind {
        match self {
            Refinement::Value { .. } => RefinementKind::Value,
            Refinement::Range { .. } => RefinementKind::Range,
        }
    }

    /// Text value of a value refinement
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Refinement::Value { value, .. } => Some(value),
            Refinement::Range { .. } => None,
        }
    }
}

/// Field a navigation's refinements are ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Value,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSort {
    pub field: SortField,
    pub descending: bool,
}

/// A named, filterable dimension of the result set
///
/// `selected` holds indices into `refinements`; every index is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    pub field: String,
    pub label: String,
    pub range: bool,
    pub or: bool,
    /// The bridge has more refinements than it returned
    pub more: bool,
    pub refinements: Vec<Refinement>,
    pub selected: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<NavigationSort>,
}

impl Navigation {
    /// Empty navigation labelled with its own field name
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            label: field.clone(),
            field,
            range: false,
            or: false,
            more: false,
            refinements: Vec::new(),
            selected: Vec::new(),
            sort: None,
        }
    }

    pub fn kind(&self) -> RefinementKind {
        RefinementKind::from_range(self.range)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected refinements in selection order
    pub fn selected_refinements(&self) -> impl Iterator<Item = &Refinement> {
        self.selected
            .iter()
            .filter_map(|&index| self.refinements.get(index))
    }

    /// Keep the refinements at `order` (old indices) in that order,
    /// remapping `selected` and dropping selections that did not survive.
    pub fn reindex(&mut self, order: &[usize]) {
        let refinements = order
            .iter()
            .filter_map(|&old| self.refinements.get(old).cloned())
            .collect();
        let selected = self
            .selected
            .iter()
            .filter_map(|old| order.iter().position(|o| o == old))
            .collect();
        self.refinements = refinements;
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reindex_remaps_selection() {
        let mut navigation = Navigation::new("brand");
        navigation.refinements = vec![
            Refinement::value("a"),
            Refinement::value("b"),
            Refinement::value("c"),
        ];
        navigation.selected = vec![2, 0];

        navigation.reindex(&[2, 1]);

        assert_eq!(
            navigation.refinements,
            vec![Refinement::value("c"), Refinement::value("b")]
        );
        // "a" was dropped, so only "c" stays selected
        assert_eq!(navigation.selected, vec![0]);
    }

    #[test]
    fn test_refinement_json_shapes() {
        let value: Refinement = serde_json::from_str(r#"{"value":"Nike","total":3}"#).unwrap();
        assert_eq!(value, Refinement::value("Nike").with_total(3));

        let range: Refinement = serde_json::from_str(r#"{"low":1.0,"high":5.0}"#).unwrap();
        assert_eq!(range, Refinement::range(1.0, 5.0));
    }
}
