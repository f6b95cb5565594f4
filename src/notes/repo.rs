use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewNote, Note, NoteChanges};

/// Note store. Every method is a single-record operation.
#[async_trait]
pub trait NoteRepo: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Note>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Note>>;
    async fn insert(&self, new: NewNote) -> anyhow::Result<Note>;
    /// Returns `None` when no note has this id.
    async fn update(&self, id: Uuid, changes: NoteChanges) -> anyhow::Result<Option<Note>>;
    /// Returns whether a note was removed.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgNoteRepo {
    db: PgPool,
}

impl PgNoteRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepo for PgNoteRepo {
    async fn list(&self) -> anyhow::Result<Vec<Note>> {
        let rows = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, content, important, user_id, created_at
            FROM notes
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list notes")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, content, important, user_id, created_at
            FROM notes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find note")?;
        Ok(note)
    }

    async fn insert(&self, new: NewNote) -> anyhow::Result<Note> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, content, important, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content, important, user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.content)
        .bind(new.important)
        .bind(new.user_id)
        .fetch_one(&self.db)
        .await
        .context("insert note")?;
        Ok(note)
    }

    async fn update(&self, id: Uuid, changes: NoteChanges) -> anyhow::Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
               SET content = COALESCE($2, content),
                   important = COALESCE($3, important)
             WHERE id = $1
            RETURNING id, content, important, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(changes.content)
        .bind(changes.important)
        .fetch_optional(&self.db)
        .await
        .context("update note")?;
        Ok(note)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM notes WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete note")?;
        Ok(res.rows_affected() > 0)
    }
}
