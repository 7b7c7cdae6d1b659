use super::{pages, AppState};
use axum::{extract::State, response::Html};
use std::sync::atomic::Ordering;
use tracing::error;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let now = chrono::Local::now().format("%H:%M:%S").to_string();
    Html(pages::index(
        &now,
        state.found_count(),
        state.monitoring_active.load(Ordering::Relaxed),
    ))
}

/// Diagnostics go to the log; the page only says where to look.
pub async fn debug(State(state): State<AppState>) -> Html<String> {
    // Failures are already logged by the hunter.
    let _ = state.hunter.debug().await;
    Html(pages::debug_done())
}

pub async fn parse(State(state): State<AppState>) -> Html<String> {
    let items = match state.hunter.parse().await {
        Ok(items) => {
            state.replace_found(&items);
            items
        }
        Err(_) => vec![],
    };
    Html(pages::parse_result(&items))
}

pub async fn raw(State(state): State<AppState>) -> Html<String> {
    match state.hunter.preview().await {
        Ok(preview) => Html(pages::raw(&preview)),
        Err(e) => {
            error!("Raw preview failed: {}", e);
            Html(pages::raw_error(&e.to_string()))
        }
    }
}

pub async fn health() -> &'static str {
    "OK"
}
