use tracing::{info, warn};

use super::{
    claims::Identity,
    dto::LoginResponse,
    jwt::JwtKeys,
    password::verify_password,
};
use crate::{
    error::{ApiError, ApiResult},
    users::repo::UserRepo,
};

/// Checks `password` against the stored hash and signs a token for the user.
pub async fn issue_token(
    users: &dyn UserRepo,
    keys: &JwtKeys,
    username: &str,
    password: &str,
) -> ApiResult<LoginResponse> {
    let Some(user) = users.find_by_username(username).await? else {
        warn!(%username, "login unknown username");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(%username, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = keys.sign(&Identity {
        user_id: user.id,
        username: user.username.clone(),
    })?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    })
}

pub fn verify_token(keys: &JwtKeys, token: &str) -> ApiResult<Identity> {
    match keys.verify(token) {
        Ok(claims) => Ok(claims.into()),
        Err(e) => {
            warn!(error = %e, "invalid token");
            Err(ApiError::InvalidToken)
        }
    }
}
