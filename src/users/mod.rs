mod dto;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub mod repo;
mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use dto::{DeletedUserResponse, UserPayload};
pub use repo::{PgUserStore, StoreError, UserStore};
pub use repo_types::{NewUser, User};

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
