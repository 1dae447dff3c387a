use crate::actions::Action;
use crate::state::Details;

pub fn reduce(mut state: Details, action: &Action) -> Details {
    match action {
        Action::UpdateDetails(product) | Action::ReceiveDetailsProduct(Ok(product)) => {
            state.product = Some(product.clone());
        }
        _ => {}
    }
    state
}
