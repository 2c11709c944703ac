use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod policy;
pub mod repo;
pub mod repo_types;
mod service;

pub fn router() -> Router<AppState> {
    handlers::post_routes()
}
