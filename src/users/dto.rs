use serde::{Deserialize, Serialize};

use super::repo_types::User;

/// Body of POST and PUT /users. Every field is optional on the wire so a
/// missing one surfaces as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedUserResponse {
    pub message: String,
    pub user: User,
}
