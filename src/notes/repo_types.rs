use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
    pub user_id: Uuid, // owner, set once at creation
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub content: String,
    pub important: bool,
    pub user_id: Uuid,
}

/// Fields replaced by an update; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub content: Option<String>,
    pub important: Option<bool>,
}
