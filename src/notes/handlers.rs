use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    services,
};
use crate::{
    auth::Identity,
    error::{parse_id, ApiResult},
    state::AppState,
};

pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
}

#[instrument(skip(state))]
pub async fn list_notes(State(state): State<AppState>) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notes = services::list_notes(state.notes.as_ref()).await?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_note(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<NoteResponse>> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    let note = services::get_note(state.notes.as_ref(), id).await?;
    Ok(Json(note.into()))
}

#[instrument(skip(state, payload), fields(user_id = %who.user_id))]
pub async fn create_note(
    State(state): State<AppState>,
    who: Identity,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, HeaderMap, Json<NoteResponse>)> {
    let Json(payload) = payload?;
    let note =
        services::create_note(state.notes.as_ref(), state.users.as_ref(), &who, payload).await?;

    let mut headers = HeaderMap::new();
    let location = HeaderValue::try_from(format!("/notes/{}", note.id))
        .map_err(anyhow::Error::new)?;
    headers.insert(header::LOCATION, location);

    Ok((StatusCode::CREATED, headers, Json(note.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_note(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> ApiResult<Json<NoteResponse>> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let note = services::update_note(state.notes.as_ref(), id, payload).await?;
    Ok(Json(note.into()))
}

#[instrument(skip(state), fields(user_id = %who.user_id))]
pub async fn delete_note(
    State(state): State<AppState>,
    who: Identity,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    services::delete_note(state.notes.as_ref(), &who, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
