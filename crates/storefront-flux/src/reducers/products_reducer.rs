use crate::actions::Action;
use crate::state::Product;

pub fn reduce(mut state: Vec<Product>, action: &Action) -> Vec<Product> {
    match action {
        Action::ReceiveProductRecords(products) => {
            state = products.clone();
        }
        Action::ReceiveMoreProducts(Ok(products)) => {
            log::debug!("Appending {} products to {}", products.len(), state.len());
            state.extend(products.iter().cloned());
        }
        _ => {}
    }
    state
}
