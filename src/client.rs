//! Typed HTTP client for the notes API.
//!
//! Credentials are never held globally: `login` returns a [`Session`] that the
//! caller passes into every call that needs authentication.

use reqwest::{header::AUTHORIZATION, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    auth::dto::{LoginRequest, LoginResponse},
    error::ErrorBody,
};

pub use crate::notes::dto::{
    CreateNoteRequest as NewNote, NoteResponse as Note, UpdateNoteRequest as NoteUpdate,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Per-session credential obtained from [`NotesClient::login`].
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

impl Session {
    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl From<LoginResponse> for Session {
    fn from(r: LoginResponse) -> Self {
        Self {
            token: r.token,
            username: r.username,
            name: r.name,
        }
    }
}

#[derive(Clone)]
pub struct NotesClient {
    base_url: String,
    client: reqwest::Client,
}

impl NotesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let resp = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        decode::<LoginResponse>(resp).await.map(Session::from)
    }

    pub async fn list_all(&self) -> Result<Vec<Note>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/notes", self.base_url))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn create(&self, session: &Session, note: &NewNote) -> Result<Note, ClientError> {
        let resp = self
            .client
            .post(format!("{}/notes", self.base_url))
            .header(AUTHORIZATION, session.bearer())
            .json(note)
            .send()
            .await?;
        decode(resp).await
    }

    /// Sent without credentials; the server does not require them for updates.
    pub async fn update(&self, id: Uuid, changes: &NoteUpdate) -> Result<Note, ClientError> {
        let resp = self
            .client
            .put(format!("{}/notes/{}", self.base_url, id))
            .json(changes)
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        return Err(ClientError::Api { status, message });
    }
    Ok(resp.json::<T>().await?)
}
