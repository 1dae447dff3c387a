//! Correlation ids
//!
//! A dispatched unit (single action or batch) that contains a recall- or
//! search-changing action gets one fresh id of that kind, stamped into the
//! metadata of every member. The session reducer picks the ids up from there.

use super::{Action, ActionType, Envelope, Meta};
use uuid::Uuid;

/// Actions that start a new recall
pub const RECALL_CHANGING: &[ActionType] = &[
    ActionType::UpdateQuery,
    ActionType::AddRefinement,
    ActionType::SelectRefinement,
    ActionType::DeselectRefinement,
    ActionType::ResetRefinements,
];

/// Actions that change the next search request
pub const SEARCH_CHANGING: &[ActionType] = &[
    ActionType::UpdateQuery,
    ActionType::AddRefinement,
    ActionType::SelectRefinement,
    ActionType::DeselectRefinement,
    ActionType::ResetRefinements,
    ActionType::ResetPage,
    ActionType::UpdateCurrentPage,
    ActionType::UpdatePageSize,
    ActionType::SelectSort,
    ActionType::SelectCollection,
];

/// Source of fresh correlation ids
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable ids (`id-1`, `id-2`, ...)
#[derive(Debug, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("id-{}", self.issued)
    }
}

/// Wrap one dispatched unit into envelopes carrying its correlation ids
pub fn stamp_correlation_ids(actions: Vec<Action>, ids: &mut dyn IdGenerator) -> Vec<Envelope> {
    let contains = |set: &[ActionType]| {
        actions
            .iter()
            .any(|action| set.contains(&action.action_type()))
    };
    let recall_id = contains(RECALL_CHANGING).then(|| ids.next_id());
    let search_id = contains(SEARCH_CHANGING).then(|| ids.next_id());

    actions
        .into_iter()
        .map(|action| Envelope {
            action,
            meta: Meta {
                recall_id: recall_id.clone(),
                search_id: search_id.clone(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_batch_shares_ids() {
        let mut ids = SequentialIds::default();
        let envelopes = stamp_correlation_ids(
            vec![Action::ResetPage, Action::UpdateQuery(Some("shoes".into()))],
            &mut ids,
        );

        assert_eq!(envelopes.len(), 2);
        for envelope in &envelopes {
            assert_eq!(envelope.meta.recall_id.as_deref(), Some("id-1"));
            assert_eq!(envelope.meta.search_id.as_deref(), Some("id-2"));
        }
    }

    #[test]
    fn test_search_only_actions_keep_recall() {
        let mut ids = SequentialIds::default();
        let envelopes = stamp_correlation_ids(vec![Action::UpdateCurrentPage(2)], &mut ids);

        assert_eq!(envelopes[0].meta.recall_id, None);
        assert_eq!(envelopes[0].meta.search_id.as_deref(), Some("id-1"));
    }

    #[test]
    fn test_unrelated_actions_are_not_stamped() {
        let mut ids = SequentialIds::default();
        let envelopes = stamp_correlation_ids(vec![Action::FetchProducts], &mut ids);

        assert_eq!(envelopes[0].meta, Meta::default());
        // no id was consumed
        assert_eq!(ids.next_id(), "id-1");
    }

    #[test]
    fn test_uuid_ids_are_fresh() {
        let mut ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
