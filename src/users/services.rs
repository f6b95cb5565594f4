use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{NoteSummary, PublicUser, SignupRequest},
    repo::UserRepo,
    repo_types::{InsertUserError, NewUser, User},
};
use crate::{
    auth::password::{self, hash_password},
    error::{ApiError, ApiResult},
    notes::repo::NoteRepo,
};

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^\S{3,}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

/// Registers a user, storing only the password hash.
pub async fn create_user(users: &dyn UserRepo, req: SignupRequest) -> ApiResult<User> {
    if !is_valid_username(&req.username) {
        warn!(username = %req.username, "invalid username");
        return Err(ApiError::ValidationFailed(
            "username must be at least 3 characters long and contain no whitespace".into(),
        ));
    }
    if let Err(msg) = password::check_policy(&req.password) {
        warn!(username = %req.username, "password rejected by policy");
        return Err(ApiError::ValidationFailed(msg));
    }

    if users.find_by_username(&req.username).await?.is_some() {
        warn!(username = %req.username, "username already registered");
        return Err(ApiError::DuplicateUsername);
    }

    let password_hash = hash_password(&req.password)?;
    let user = users
        .insert(NewUser {
            username: req.username,
            name: req.name,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            InsertUserError::DuplicateUsername => ApiError::DuplicateUsername,
            InsertUserError::Other(e) => ApiError::Internal(e),
        })?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// All users, each with a summary of the notes they own.
pub async fn list_users(users: &dyn UserRepo, notes: &dyn NoteRepo) -> ApiResult<Vec<PublicUser>> {
    let mut by_owner: HashMap<Uuid, Vec<NoteSummary>> = HashMap::new();
    for note in notes.list().await? {
        by_owner.entry(note.user_id).or_default().push(note.into());
    }

    let out = users
        .list()
        .await?
        .into_iter()
        .map(|user| {
            let owned = by_owner.remove(&user.id).unwrap_or_default();
            public_user(user, owned)
        })
        .collect();
    Ok(out)
}

pub fn public_user(user: User, notes: Vec<NoteSummary>) -> PublicUser {
    PublicUser {
        id: user.id,
        username: user.username,
        name: user.name,
        notes,
    }
}
