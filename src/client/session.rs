use std::time::Instant;

use tracing::info;

use super::api::DirectoryApi;
use super::form::{FormErrors, UserForm};
use super::view::DirectoryView;
use crate::users::User;

#[derive(Debug)]
pub enum SubmitOutcome {
    Created(User),
    /// Client-side validation failed; nothing was sent.
    Invalid(FormErrors),
    /// The service call failed; the view carries the message.
    Failed,
}

/// Wires the page state to the API. Each action is one round trip.
pub struct DirectorySession {
    api: DirectoryApi,
    view: DirectoryView,
}

impl DirectorySession {
    pub fn new(api: DirectoryApi) -> Self {
        Self {
            api,
            view: DirectoryView::new(),
        }
    }

    pub fn view(&self) -> &DirectoryView {
        &self.view
    }

    pub fn api(&self) -> &DirectoryApi {
        &self.api
    }

    /// Initial load, also used to reconcile optimistic edits with the server.
    pub fn load(&mut self) {
        self.view.start_loading();
        let result = self.api.list_users();
        self.view.finish_load(result, Instant::now());
    }

    pub fn submit(&mut self, form: &UserForm) -> SubmitOutcome {
        let draft = match form.validate() {
            Ok(d) => d,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        match self.api.create_user(&draft) {
            Ok(user) => {
                info!(user_id = user.id, "user added");
                self.view.user_added(user.clone(), Instant::now());
                SubmitOutcome::Created(user)
            }
            Err(e) => {
                self.view.add_failed(&e, Instant::now());
                SubmitOutcome::Failed
            }
        }
    }

    /// Deletes after `confirm` agrees. Returns whether the row is gone.
    pub fn delete<F>(&mut self, id: i32, confirm: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return false;
        }
        match self.api.delete_user(id) {
            Ok(_) => {
                info!(user_id = id, "user deleted");
                self.view.user_deleted(id, Instant::now());
                true
            }
            Err(_) => {
                self.view.delete_failed(Instant::now());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::DEFAULT_TIMEOUT;
    use crate::client::form::Field;
    use crate::test_support::spawn_server;

    fn session() -> DirectorySession {
        let api = DirectoryApi::new(&spawn_server(), DEFAULT_TIMEOUT).unwrap();
        let mut s = DirectorySession::new(api);
        s.load();
        s
    }

    fn form(name: &str, email: &str) -> UserForm {
        UserForm {
            name: name.into(),
            email: email.into(),
            city: "Oslo".into(),
            country: "Norway".into(),
        }
    }

    #[test]
    fn load_settles_with_empty_list() {
        let s = session();
        assert!(!s.view().is_loading());
        assert!(s.view().users().is_empty());
        assert!(s.view().status(Instant::now()).is_none());
    }

    #[test]
    fn invalid_form_never_reaches_the_service() {
        let mut s = session();
        let outcome = s.submit(&form("K", "kari@example.no"));
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.contains_key(&Field::Name)));
        assert!(s.api().list_users().unwrap().is_empty());
    }

    #[test]
    fn submit_prepends_without_refetch() {
        let mut s = session();
        assert!(matches!(s.submit(&form("Kari", "kari@example.no")), SubmitOutcome::Created(_)));
        assert!(matches!(s.submit(&form("Ola", "OLA@example.no")), SubmitOutcome::Created(_)));

        let emails: Vec<&str> = s.view().users().iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["ola@example.no", "kari@example.no"]);
        assert_eq!(
            s.view().status(Instant::now()).unwrap().text,
            "User added successfully!"
        );
    }

    #[test]
    fn duplicate_submit_shows_service_error() {
        let mut s = session();
        s.submit(&form("Kari", "kari@example.no"));
        assert!(matches!(s.submit(&form("Kari", "kari@example.no")), SubmitOutcome::Failed));
        assert_eq!(s.view().users().len(), 1);
        assert_eq!(
            s.view().status(Instant::now()).unwrap().text,
            "Email already exists"
        );
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut s = session();
        let SubmitOutcome::Created(user) = s.submit(&form("Kari", "kari@example.no")) else {
            panic!("expected user to be created");
        };

        assert!(!s.delete(user.id, || false));
        assert_eq!(s.view().users().len(), 1);

        assert!(s.delete(user.id, || true));
        assert!(s.view().users().is_empty());

        // stale second delete fails and leaves the list alone
        assert!(!s.delete(user.id, || true));
        assert_eq!(
            s.view().status(Instant::now()).unwrap().text,
            "Failed to delete user"
        );
    }

    #[test]
    fn reload_reconciles_with_server() {
        let mut s = session();
        s.submit(&form("Kari", "kari@example.no"));
        let other = s
            .api()
            .create_user(&form("Ola", "ola@example.no").validate().unwrap())
            .unwrap();
        assert_eq!(s.view().users().len(), 1);

        s.load();
        assert_eq!(s.view().users().len(), 2);
        assert_eq!(s.view().users()[0].id, other.id);
    }
}
