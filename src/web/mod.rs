mod pages;
mod routes;

use crate::{funpay::ExtractedItem, hunter::Hunter};
use axum::{routing::get, Router};
use std::{
    collections::HashMap,
    sync::{atomic::AtomicBool, Arc, RwLock},
};

/// Shared across handlers. `found_items` is advisory: every successful parse
/// replaces it wholesale and concurrent parses race with last writer winning.
#[derive(Clone)]
pub struct AppState {
    pub hunter: Arc<Hunter>,
    pub found_items: Arc<RwLock<HashMap<String, ExtractedItem>>>,
    pub monitoring_active: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(hunter: Hunter) -> Self {
        AppState {
            hunter: Arc::new(hunter),
            found_items: Arc::new(RwLock::new(HashMap::new())),
            monitoring_active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn replace_found(&self, items: &[ExtractedItem]) {
        let fresh: HashMap<String, ExtractedItem> = items
            .iter()
            .map(|item| (item.id.clone(), item.clone()))
            .collect();
        match self.found_items.write() {
            Ok(mut found) => *found = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }

    pub(crate) fn found_count(&self) -> usize {
        match self.found_items.read() {
            Ok(found) => found.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/debug", get(routes::debug))
        .route("/parse", get(routes::parse))
        .route("/raw", get(routes::raw))
        .route("/health", get(routes::health))
        .with_state(state)
}
