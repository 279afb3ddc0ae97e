mod in_memory;
mod user;

pub use in_memory::*;
pub use user::*;

use async_trait::async_trait;

use crate::domain::{NewUser, StoredUser};

/// The persistence collaborator of the sign up flow.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Opens a unit of work. Nothing added to it is visible until `commit` succeeds.
    async fn begin(&self) -> Result<Box<dyn UserUnitOfWork>, anyhow::Error>;

    /// Every committed user, oldest first.
    async fn users(&self) -> Result<Vec<StoredUser>, anyhow::Error>;
}

/// A pending add-then-commit. Dropping it without committing discards what was added.
#[async_trait]
pub trait UserUnitOfWork: Send {
    async fn add(&mut self, user: &NewUser) -> Result<(), anyhow::Error>;

    async fn commit(self: Box<Self>) -> Result<(), anyhow::Error>;
}
