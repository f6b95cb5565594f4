use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod dto;
mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod services;

pub use claims::Identity;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::login_routes())
}
