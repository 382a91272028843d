use std::sync::Arc;

use crate::store::LawStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LawStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn LawStore>) -> Self {
        Self { store }
    }
}
