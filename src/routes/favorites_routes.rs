//! Favorites endpoints.

use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use serde::Serialize;

use crate::favorites::Toggled;
use crate::models::PetId;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers favorites routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites))
        .route("/favorites/{pet_id}/toggle", post(toggle_favorite))
}

#[derive(Serialize)]
struct FavoritesResponse {
    favorites: Vec<PetId>,
}

async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    Json(FavoritesResponse {
        favorites: state.shell.favorite_ids(),
    })
}

/// Flips one pet in or out of the favorites and writes the set through to storage.
async fn toggle_favorite(
    State(state): State<AppState>,
    WithRejection(Path(pet_id), _): WithRejection<Path<PetId>, HTTPError>,
) -> Json<Toggled> {
    Json(state.shell.toggle_favorite(pet_id))
}
