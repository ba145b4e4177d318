use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use super::dto::UserPayload;
use super::repo::UserStore;
use super::repo_types::{NewUser, User};
use crate::error::DirectoryError;

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Presence check shared by create and update. Returns the trimmed fields
/// with the email lower-cased.
fn require_fields(payload: UserPayload) -> Result<NewUser, DirectoryError> {
    let has_nul = [&payload.name, &payload.email, &payload.city, &payload.country]
        .iter()
        .any(|v| v.as_deref().is_some_and(|s| s.contains('\0')));
    if has_nul {
        warn!("rejected user payload with NUL characters");
        return Err(DirectoryError::Validation(
            "Fields must not contain NUL characters".into(),
        ));
    }

    fn present(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    match (
        present(payload.name),
        present(payload.email),
        present(payload.city),
        present(payload.country),
    ) {
        (Some(name), Some(email), Some(city), Some(country)) => Ok(NewUser {
            name,
            email: email.to_lowercase(),
            city,
            country,
        }),
        _ => {
            warn!("rejected user payload with missing fields");
            Err(DirectoryError::Validation("All fields are required".into()))
        }
    }
}

pub fn validate_new_user(payload: UserPayload) -> Result<NewUser, DirectoryError> {
    let user = require_fields(payload)?;
    if !is_valid_email(&user.email) {
        warn!(email = %user.email, "invalid email");
        return Err(DirectoryError::Validation("Invalid email format".into()));
    }
    Ok(user)
}

/// Update only checks presence; the email format is accepted as sent.
pub fn validate_replacement(payload: UserPayload) -> Result<NewUser, DirectoryError> {
    require_fields(payload)
}

pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>, DirectoryError> {
    store
        .list()
        .await
        .map_err(|e| DirectoryError::from_store("Failed to fetch users", e))
}

pub async fn create_user(
    store: &dyn UserStore,
    payload: UserPayload,
) -> Result<User, DirectoryError> {
    let new_user = validate_new_user(payload)?;
    let user = store
        .insert(&new_user)
        .await
        .map_err(|e| DirectoryError::from_store("Failed to create user", e))?;
    debug!(user_id = user.id, email = %user.email, "user created");
    Ok(user)
}

pub async fn get_user(store: &dyn UserStore, id: i32) -> Result<User, DirectoryError> {
    store
        .find(id)
        .await
        .map_err(|e| DirectoryError::from_store("Failed to fetch user", e))?
        .ok_or(DirectoryError::NotFound)
}

pub async fn update_user(
    store: &dyn UserStore,
    id: i32,
    payload: UserPayload,
) -> Result<User, DirectoryError> {
    let fields = validate_replacement(payload)?;
    store
        .update(id, &fields)
        .await
        .map_err(|e| DirectoryError::from_store("Failed to update user", e))?
        .ok_or(DirectoryError::NotFound)
}

pub async fn delete_user(store: &dyn UserStore, id: i32) -> Result<User, DirectoryError> {
    store
        .delete(id)
        .await
        .map_err(|e| DirectoryError::from_store("Failed to delete user", e))?
        .ok_or(DirectoryError::NotFound)
}
