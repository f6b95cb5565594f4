use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{CreateNoteRequest, UpdateNoteRequest},
    repo::NoteRepo,
    repo_types::{NewNote, Note, NoteChanges},
};
use crate::{
    auth::Identity,
    error::{ApiError, ApiResult},
    users::repo::UserRepo,
};

pub const MIN_CONTENT_LEN: usize = 5;

fn check_content(content: &str) -> ApiResult<()> {
    if content.chars().count() < MIN_CONTENT_LEN {
        return Err(ApiError::ValidationFailed(format!(
            "content must be at least {MIN_CONTENT_LEN} characters long"
        )));
    }
    Ok(())
}

/// Every note, regardless of owner.
pub async fn list_notes(notes: &dyn NoteRepo) -> ApiResult<Vec<Note>> {
    Ok(notes.list().await?)
}

pub async fn get_note(notes: &dyn NoteRepo, id: Uuid) -> ApiResult<Note> {
    notes.find_by_id(id).await?.ok_or(ApiError::NotFound)
}

/// Creates a note owned by `who`.
pub async fn create_note(
    notes: &dyn NoteRepo,
    users: &dyn UserRepo,
    who: &Identity,
    req: CreateNoteRequest,
) -> ApiResult<Note> {
    // Tokens are never revoked, so the owner is re-checked here.
    if users.find_by_id(who.user_id).await?.is_none() {
        warn!(user_id = %who.user_id, "token for unknown user");
        return Err(ApiError::InvalidToken);
    }

    let Some(content) = req.content else {
        warn!(user_id = %who.user_id, "note content missing");
        return Err(ApiError::ValidationFailed("content missing".into()));
    };
    if let Err(e) = check_content(&content) {
        warn!(user_id = %who.user_id, "note content too short");
        return Err(e);
    }

    let note = notes
        .insert(NewNote {
            content,
            important: req.important.unwrap_or(false),
            user_id: who.user_id,
        })
        .await?;

    info!(note_id = %note.id, user_id = %note.user_id, "note created");
    Ok(note)
}

/// Replaces content and/or importance. Any caller may update any note.
pub async fn update_note(notes: &dyn NoteRepo, id: Uuid, req: UpdateNoteRequest) -> ApiResult<Note> {
    if let Some(content) = req.content.as_deref() {
        check_content(content)?;
    }

    let note = notes
        .update(
            id,
            NoteChanges {
                content: req.content,
                important: req.important,
            },
        )
        .await?
        .ok_or(ApiError::NotFound)?;

    info!(note_id = %note.id, important = note.important, "note updated");
    Ok(note)
}

/// Removes a note. Absent ids are not an error.
pub async fn delete_note(notes: &dyn NoteRepo, who: &Identity, id: Uuid) -> ApiResult<()> {
    let removed = notes.delete(id).await?;
    info!(note_id = %id, user_id = %who.user_id, removed, "note deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{memory::MemoryStore, users::repo_types::NewUser};

    async fn store_with_user() -> (MemoryStore, Identity) {
        let store = MemoryStore::new();
        let user = UserRepo::insert(
            &store,
            NewUser {
                username: "mluukkai".into(),
                name: None,
                password_hash: "hash".into(),
            },
        )
        .await
        .unwrap();
        let who = Identity {
            user_id: user.id,
            username: user.username,
        };
        (store, who)
    }

    fn content(s: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            content: Some(s.into()),
            important: None,
        }
    }

    #[tokio::test]
    async fn short_content_is_rejected() {
        let (store, who) = store_with_user().await;
        for s in ["", "a", "abcd", "äöå"] {
            let err = create_note(&store, &store, &who, content(s)).await.unwrap_err();
            assert!(matches!(err, ApiError::ValidationFailed(_)), "{s:?}");
        }
        assert!(list_notes(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn content_length_counts_characters() {
        let (store, who) = store_with_user().await;
        let note = create_note(&store, &store, &who, content("äöåüß")).await.unwrap();
        assert_eq!(note.content, "äöåüß");
    }

    #[tokio::test]
    async fn missing_content_is_rejected() {
        let (store, who) = store_with_user().await;
        let err = create_note(&store, &store, &who, CreateNoteRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn owner_comes_from_identity_and_importance_defaults_false() {
        let (store, who) = store_with_user().await;
        let note = create_note(&store, &store, &who, content("HTML is easy")).await.unwrap();
        assert_eq!(note.user_id, who.user_id);
        assert!(!note.important);
    }

    #[tokio::test]
    async fn unknown_owner_is_rejected() {
        let (store, _) = store_with_user().await;
        let ghost = Identity {
            user_id: Uuid::new_v4(),
            username: "ghost".into(),
        };
        let err = create_note(&store, &store, &ghost, content("HTML is easy"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn get_absent_note_is_not_found() {
        let (store, _) = store_with_user().await;
        let err = get_note(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn update_toggles_importance() {
        let (store, who) = store_with_user().await;
        let note = create_note(&store, &store, &who, content("HTML is easy")).await.unwrap();
        let updated = update_note(
            &store,
            note.id,
            UpdateNoteRequest {
                content: None,
                important: Some(true),
            },
        )
        .await
        .unwrap();
        assert!(updated.important);
        assert_eq!(updated.content, "HTML is easy");
        assert_eq!(updated.user_id, who.user_id);
    }

    #[tokio::test]
    async fn update_validates_content_and_existence() {
        let (store, who) = store_with_user().await;
        let note = create_note(&store, &store, &who, content("HTML is easy")).await.unwrap();
        let err = update_note(
            &store,
            note.id,
            UpdateNoteRequest {
                content: Some("tiny".into()),
                important: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::ValidationFailed(_)));

        let err = update_note(&store, Uuid::new_v4(), UpdateNoteRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (store, who) = store_with_user().await;
        let note = create_note(&store, &store, &who, content("HTML is easy")).await.unwrap();

        delete_note(&store, &who, Uuid::new_v4()).await.unwrap();
        assert_eq!(list_notes(&store).await.unwrap().len(), 1);

        delete_note(&store, &who, note.id).await.unwrap();
        delete_note(&store, &who, note.id).await.unwrap();
        assert!(list_notes(&store).await.unwrap().is_empty());
    }
}
