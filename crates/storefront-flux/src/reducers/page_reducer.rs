use crate::actions::Action;
use crate::state::Page;

pub fn reduce(mut state: Page, action: &Action) -> Page {
    match action {
        Action::ResetPage => {
            state.current = 1;
        }
        Action::UpdateCurrentPage(page) => {
            state.current = *page;
        }
        Action::UpdatePageSize(size) => match state.sizes.items.iter().position(|item| item == size) {
            Some(index) => state.sizes.selected = index,
            None => log::warn!("Page size {} is not one of {:?}", size, state.sizes.items),
        },
        Action::ReceivePage(window) => {
            state.apply_window(window);
        }
        _ => {}
    }
    state
}
