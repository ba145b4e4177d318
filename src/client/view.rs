use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::api::ApiError;
use crate::users::User;

/// How long a success message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    shown_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub cities: usize,
    pub countries: usize,
}

/// Client-side page state. The user list is a shared snapshot; every change
/// builds a new one.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    users: Arc<[User]>,
    loading: bool,
    status: Option<StatusMessage>,
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryView {
    pub fn new() -> Self {
        Self {
            users: Arc::from(Vec::new()),
            loading: true,
            status: None,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn snapshot(&self) -> Arc<[User]> {
        Arc::clone(&self.users)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn stats(&self) -> Stats {
        let cities: HashSet<&str> = self.users.iter().map(|u| u.city.as_str()).collect();
        let countries: HashSet<&str> = self.users.iter().map(|u| u.country.as_str()).collect();
        Stats {
            total: self.users.len(),
            cities: cities.len(),
            countries: countries.len(),
        }
    }

    /// Success messages expire after [`STATUS_TTL`]; errors stay until the
    /// next message replaces them.
    pub fn status(&self, now: Instant) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|s| {
            s.kind == StatusKind::Error || now.saturating_duration_since(s.shown_at) < STATUS_TTL
        })
    }

    fn flash(&mut self, kind: StatusKind, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            shown_at: now,
        });
    }

    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Settles a full load; the server list replaces whatever was shown.
    pub fn finish_load(&mut self, result: Result<Vec<User>, ApiError>, now: Instant) {
        self.loading = false;
        match result {
            Ok(users) => self.users = Arc::from(users),
            Err(_) => self.flash(StatusKind::Error, "Failed to load users", now),
        }
    }

    pub fn user_added(&mut self, user: User, now: Instant) {
        self.users = std::iter::once(user)
            .chain(self.users.iter().cloned())
            .collect();
        self.flash(StatusKind::Success, "User added successfully!", now);
    }

    pub fn add_failed(&mut self, err: &ApiError, now: Instant) {
        self.flash(StatusKind::Error, err.user_message("Failed to add user"), now);
    }

    pub fn user_deleted(&mut self, id: i32, now: Instant) {
        self.users = self.users.iter().filter(|u| u.id != id).cloned().collect();
        self.flash(StatusKind::Success, "User deleted successfully!", now);
    }

    pub fn delete_failed(&mut self, now: Instant) {
        self.flash(StatusKind::Error, "Failed to delete user", now);
    }
}
