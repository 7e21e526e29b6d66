//! Session lifecycle endpoints: mount, login, sign-up, logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;

use crate::models::account::{LoginRequest, RegisterRequest};
use crate::shell::ShellView;
use crate::state::AppState;
use crate::utils::http_helpers::{HTTPError, sign_up_error};

/// Registers session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mount", post(mount).delete(unmount))
        .route("/session", get(session))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
}

/// Runs the on-mount step: reloads favorites and resolves the stored token once.
async fn mount(State(state): State<AppState>) -> Json<ShellView> {
    Json(state.shell.mount().await)
}

async fn unmount(State(state): State<AppState>) -> StatusCode {
    state.shell.unmount();
    StatusCode::NO_CONTENT
}

/// Current view without any network traffic.
async fn session(State(state): State<AppState>) -> Json<ShellView> {
    Json(state.shell.view())
}

async fn login(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, HTTPError>,
) -> Result<Json<ShellView>, HTTPError> {
    Ok(Json(state.shell.login(&request).await?))
}

async fn register(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, HTTPError>,
) -> Result<(StatusCode, Json<ShellView>), HTTPError> {
    let view = state.shell.register(&request).await.map_err(sign_up_error)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn logout(State(state): State<AppState>) -> Result<Json<ShellView>, HTTPError> {
    Ok(Json(state.shell.logout()?))
}
