use std::sync::Arc;

use sqlx::PgPool;

use crate::users::{PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn from_pool(db: PgPool) -> Self {
        Self::from_store(Arc::new(PgUserStore::new(db)))
    }

    pub fn from_store(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_store(Arc::new(crate::users::memory::MemoryUserStore::default()))
    }
}
