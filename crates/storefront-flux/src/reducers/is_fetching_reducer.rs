//! In-flight request flags
//!
//! A fetch intent raises the flag of its request kind, the matching receive
//! action clears it whether it carries a result or an error. Nothing else
//! touches the flags.

use crate::actions::Action;
use crate::state::IsFetching;

pub fn reduce(mut state: IsFetching, action: &Action) -> IsFetching {
    if let Some((kind, fetching)) = action.fetch_flag() {
        state.set(kind, fetching);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::state::RequestKind;

    #[test]
    fn test_flag_lifecycle() {
        let state = reduce(IsFetching::default(), &Action::FetchMoreRefinements("brand".into()));
        assert!(state.get(RequestKind::MoreRefinements));

        // unrelated actions leave it alone
        let state = reduce(state, &Action::ResetPage);
        let state = reduce(state, &Action::ReceiveRecordCount(3));
        assert!(state.get(RequestKind::MoreRefinements));

        let state = reduce(
            state,
            &Action::ReceiveMoreRefinements(Err(FetchError::bridge("timeout"))),
        );
        assert!(!state.get(RequestKind::MoreRefinements));
    }
}
