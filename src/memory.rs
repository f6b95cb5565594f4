//! In-process store used when no `DATABASE_URL` is configured, and by tests.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    notes::{
        repo::NoteRepo,
        repo_types::{NewNote, Note, NoteChanges},
    },
    users::{
        repo::UserRepo,
        repo_types::{InsertUserError, NewUser, User},
    },
};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    notes: RwLock<Vec<Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, new: NewUser) -> Result<User, InsertUserError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == new.username) {
            return Err(InsertUserError::DuplicateUsername);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            name: new.name,
            password_hash: new.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }
}

#[async_trait]
impl NoteRepo for MemoryStore {
    async fn list(&self) -> anyhow::Result<Vec<Note>> {
        Ok(self.notes.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.iter().find(|n| n.id == id).cloned())
    }

    async fn insert(&self, new: NewNote) -> anyhow::Result<Note> {
        let note = Note {
            id: Uuid::new_v4(),
            content: new.content,
            important: new.important,
            user_id: new.user_id,
            created_at: OffsetDateTime::now_utc(),
        };
        self.notes.write().await.push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: Uuid, changes: NoteChanges) -> anyhow::Result<Option<Note>> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        if let Some(content) = changes.content {
            note.content = content;
        }
        if let Some(important) = changes.important {
            note.important = important;
        }
        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        Ok(notes.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.into(),
            name: None,
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_username() {
        let store = MemoryStore::new();
        UserRepo::insert(&store, new_user("root")).await.expect("first insert");
        let err = UserRepo::insert(&store, new_user("root")).await.unwrap_err();
        assert!(matches!(err, InsertUserError::DuplicateUsername));
        assert_eq!(UserRepo::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_unspecified_fields() {
        let store = MemoryStore::new();
        let note = NoteRepo::insert(
            &store,
            NewNote {
                content: "original".into(),
                important: true,
                user_id: Uuid::new_v4(),
            },
        )
        .await
        .unwrap();

        let updated = store
            .update(
                note.id,
                NoteChanges {
                    content: Some("rewritten".into()),
                    important: None,
                },
            )
            .await
            .unwrap()
            .expect("note exists");
        assert_eq!(updated.content, "rewritten");
        assert!(updated.important);
        assert_eq!(updated.user_id, note.user_id);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = MemoryStore::new();
        assert!(!store.delete(Uuid::new_v4()).await.unwrap());
    }
}
