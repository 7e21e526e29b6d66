//! Pet listing and pet detail endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use axum_extra::extract::WithRejection;
use serde::Serialize;

use crate::catalogue::{PetPage, PetQuery};
use crate::models::{Pet, PetId};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers pet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pets", get(list_pets))
        .route("/pets/{pet_id}", get(pet_detail))
}

/// A pet with the current favorite state folded in.
#[derive(Serialize)]
struct ListedPet {
    #[serde(flatten)]
    pet: Pet,
    favorited: bool,
}

async fn list_pets(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PetQuery>, HTTPError>,
) -> Result<Json<PetPage<ListedPet>>, HTTPError> {
    let pets = state.catalogue.fetch().await?;
    let page = query.apply(pets)?;
    let favorites = state.shell.favorite_ids();
    Ok(Json(page.map(|pet| ListedPet {
        favorited: favorites.contains(&pet.id),
        pet,
    })))
}

async fn pet_detail(
    State(state): State<AppState>,
    WithRejection(Path(pet_id), _): WithRejection<Path<PetId>, HTTPError>,
) -> Result<Json<ListedPet>, HTTPError> {
    let pet = state
        .catalogue
        .find(pet_id)
        .await?
        .ok_or_else(|| HTTPError::new(StatusCode::NOT_FOUND, "Pet not found"))?;
    Ok(Json(ListedPet {
        favorited: state.shell.is_favorite(pet.id),
        pet,
    }))
}
