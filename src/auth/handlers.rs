use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{LoginRequest, LoginResponse},
    jwt::JwtKeys,
    services::issue_token,
};
use crate::{error::ApiResult, state::AppState};

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let keys = JwtKeys::from_ref(&state);
    let res = issue_token(
        state.users.as_ref(),
        &keys,
        &payload.username,
        &payload.password,
    )
    .await?;
    Ok(Json(res))
}
