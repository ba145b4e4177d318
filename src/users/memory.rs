use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::repo::{StoreError, UserStore};
use super::repo_types::{NewUser, User};

/// In-process stand-in for the `users` table, including its unique email
/// constraint.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: Vec<User>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let table = self.inner.read().await;
        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn insert(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut table = self.inner.write().await;
        if table.email_taken(&user.email, None) {
            return Err(StoreError::UniqueViolation);
        }
        table.next_id += 1;
        let row = User {
            id: table.next_id,
            name: user.name.clone(),
            email: user.email.clone(),
            city: user.city.clone(),
            country: user.country.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: i32) -> Result<Option<User>, StoreError> {
        let table = self.inner.read().await;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn update(&self, id: i32, user: &NewUser) -> Result<Option<User>, StoreError> {
        let mut table = self.inner.write().await;
        if !table.rows.iter().any(|u| u.id == id) {
            return Ok(None);
        }
        if table.email_taken(&user.email, Some(id)) {
            return Err(StoreError::UniqueViolation);
        }
        let Some(row) = table.rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        row.name = user.name.clone();
        row.email = user.email.clone();
        row.city = user.city.clone();
        row.country = user.country.clone();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<Option<User>, StoreError> {
        let mut table = self.inner.write().await;
        let Some(pos) = table.rows.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        Ok(Some(table.rows.remove(pos)))
    }
}
