//! Application startup and server initialization.
//!
//! This module wires the storage backend, preference store, session resolver,
//! page shell and pet catalogue together, then serves the routes.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::catalogue::PetCatalogue;
use crate::config::ConfigV1;
use crate::preferences::PreferenceStore;
use crate::routes;
use crate::session::{ApiProfileProvider, SessionResolver};
use crate::shell::Shell;
use crate::state::AppState;
use crate::storage::create_storage;

/// Builds every component from the configuration.
///
/// # Errors
///
/// Returns an error if the configured storage backend cannot be opened.
pub fn build_state(config: Arc<ConfigV1>) -> Result<AppState, Box<dyn std::error::Error>> {
    let storage = create_storage(&config.storage)?;
    let store = PreferenceStore::new(storage, &config.storage);

    let api = Arc::new(ApiProfileProvider::new(&config.api));
    let resolver = Arc::new(SessionResolver::new(
        api.clone(),
        api,
        config.api.timeout_in_ms,
        config.session.default_avatar.clone(),
    ));
    let shell = Shell::new(store, resolver);
    let catalogue = Arc::new(PetCatalogue::new(&config.api));

    Ok(AppState {
        config,
        shell,
        catalogue,
    })
}

/// Initializes and runs the page shell server.
///
/// Performs the initial mount so the first page load already sees the
/// resolved session, then binds to the configured address.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address
/// or encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config.clone())?;

    let view = state.shell.mount().await;
    info!(
        "Initial mount: logged_in={}, favorites={}",
        view.user.is_some(),
        view.favorites.len()
    );

    let app = routes::create_router(state);

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
