//! Flatwiki - a small personal wiki over flat text files
//!
//! Pages live as `<title>.txt` files in one directory. They are viewed,
//! edited and saved through `/view/<title>`, `/edit/<title>` and
//! `/save/<title>`, and `[!Other Page]` in a page body links to another page.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

use axum::{routing::get, Router};

// Re-export commonly used items
pub use components::{TemplateContext, TemplateSet};
pub use config::Config;
pub use errors::WikiError;
pub use services::{LinkRewriter, PageStore, PathRouter};
pub use types::{Action, AppState, Page, FRONT_PAGE};

/// Build the HTTP application around `state`
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_root))
        .fallback(handlers::handle_action)
        .with_state(state)
}
