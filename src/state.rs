//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! configuration, the page shell and the pet catalogue.

use crate::catalogue::PetCatalogue;
use crate::config::ConfigV1;
use crate::shell::Shell;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Session and favorites for the browser profile this process serves.
    pub shell: Shell,
    /// Cached view of the external pets listing.
    pub catalogue: Arc<PetCatalogue>,
}
