//! Blocking HTTP client for the `/api` surface.

use std::time::Duration;

use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    StatusCode,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use super::form::UserDraft;
use crate::app::HealthResponse;
use crate::error::ErrorBody;
use crate::users::{DeletedUserResponse, User};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-2xx status.
    #[error("service responded {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Service {
        status: StatusCode,
        message: Option<String>,
    },

    /// Connection refused, timeout and the like.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Text for the end user: the service's own message when it sent one,
    /// otherwise the per-action fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Service {
                message: Some(m), ..
            } => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Service { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryApi {
    client: Client,
    base_url: String,
}

impl DirectoryApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            client,
            base_url: format!("{}/api", base_url.trim_end_matches('/')),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        req: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(method, path, "api request");
        let res = req.send().map_err(|e| {
            warn!(method, path, error = %e, "api request failed");
            ApiError::Transport(e)
        })?;
        Self::decode(res)
    }

    fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
        let status = res.status();
        if status.is_success() {
            return res.json::<T>().map_err(ApiError::Decode);
        }
        let message = res.json::<ErrorBody>().ok().map(|b| b.error);
        warn!(%status, message = message.as_deref().unwrap_or(""), "api error");
        Err(ApiError::Service { status, message })
    }

    pub fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.send("GET", "/users", self.client.get(self.url("/users")))
    }

    pub fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
        self.send("POST", "/users", self.client.post(self.url("/users")).json(draft))
    }

    pub fn get_user(&self, id: i32) -> Result<User, ApiError> {
        let path = format!("/users/{id}");
        self.send("GET", &path, self.client.get(self.url(&path)))
    }

    pub fn update_user(&self, id: i32, draft: &UserDraft) -> Result<User, ApiError> {
        let path = format!("/users/{id}");
        self.send("PUT", &path, self.client.put(self.url(&path)).json(draft))
    }

    pub fn delete_user(&self, id: i32) -> Result<DeletedUserResponse, ApiError> {
        let path = format!("/users/{id}");
        self.send("DELETE", &path, self.client.delete(self.url(&path)))
    }

    pub fn health_check(&self) -> Result<HealthResponse, ApiError> {
        self.send("GET", "/health", self.client.get(self.url("/health")))
    }
}
