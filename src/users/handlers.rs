use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{PublicUser, SignupRequest},
    services,
};
use crate::{error::ApiResult, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user).get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let Json(payload) = payload?;
    let user = services::create_user(state.users.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(services::public_user(user, Vec::new()))))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<PublicUser>>> {
    let users = services::list_users(state.users.as_ref(), state.notes.as_ref()).await?;
    Ok(Json(users))
}
