//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! session lifecycle, favorites, the pet listing, and health checks.

mod favorites_routes;
mod health_routes;
mod pet_routes;
mod session_routes;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(session_routes::routes())
        .merge(favorites_routes::routes())
        .merge(pet_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}
