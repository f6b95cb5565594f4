use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String, // Argon2 PHC string, never exposed
    pub created_at: OffsetDateTime,
}

/// Insert payload; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InsertUserError {
    #[error("username already taken")]
    DuplicateUsername,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
