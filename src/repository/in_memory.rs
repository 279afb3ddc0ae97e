use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{NewUser, StoredUser};
use crate::repository::{UserStore, UserUnitOfWork};

/// Process-local `UserStore`, used for local runs and tests.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Mutex<Vec<StoredUser>>,
    fail_commits: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every `commit` fails and discards its pending users.
    pub fn set_commit_failure(&self, fail: bool) {
        self.inner.fail_commits.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn begin(&self) -> Result<Box<dyn UserUnitOfWork>, anyhow::Error> {
        Ok(Box::new(InMemoryUnitOfWork {
            store: Arc::clone(&self.inner),
            pending: Vec::new(),
        }))
    }

    async fn users(&self) -> Result<Vec<StoredUser>, anyhow::Error> {
        Ok(self.inner.users.lock().await.clone())
    }
}

struct InMemoryUnitOfWork {
    store: Arc<Inner>,
    pending: Vec<StoredUser>,
}

#[async_trait]
impl UserUnitOfWork for InMemoryUnitOfWork {
    async fn add(&mut self, user: &NewUser) -> Result<(), anyhow::Error> {
        self.pending.push(StoredUser::from_new_user(Uuid::new_v4(), user));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), anyhow::Error> {
        let InMemoryUnitOfWork { store, pending } = *self;
        if store.fail_commits.load(Ordering::SeqCst) {
            anyhow::bail!("Commit rejected by the in-memory user store");
        }
        store.users.lock().await.extend(pending);
        Ok(())
    }
}
