use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notes::repo_types::Note;

/// Request body for signup.
#[derive(Debug, Deserialize, Serialize)]
pub struct SignupRequest {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    pub password: String,
}

/// Public part of the user returned to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub notes: Vec<NoteSummary>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
}

impl From<Note> for NoteSummary {
    fn from(n: Note) -> Self {
        Self {
            id: n.id,
            content: n.content,
            important: n.important,
        }
    }
}
