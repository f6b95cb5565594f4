use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Note;

/// Public shape of a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub important: bool,
    pub user: Uuid,
}

impl From<Note> for NoteResponse {
    fn from(n: Note) -> Self {
        Self {
            id: n.id,
            content: n.content,
            date: n.created_at,
            important: n.important,
            user: n.user_id,
        }
    }
}

/// POST /notes body. Any owner field sent by the client is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
}

/// PUT /notes/:id body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
}
