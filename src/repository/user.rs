use anyhow::Context;
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::{NewUser, StoredUser};
use crate::repository::{UserStore, UserUnitOfWork};

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[tracing::instrument(skip_all)]
    async fn begin(&self) -> Result<Box<dyn UserUnitOfWork>, anyhow::Error> {
        let transaction = self
            .pool
            .begin()
            .await
            .context("Failed to acquire a Postgres connection from the pool")?;
        Ok(Box::new(PgUnitOfWork { transaction }))
    }

    #[tracing::instrument(skip_all)]
    async fn users(&self) -> Result<Vec<StoredUser>, anyhow::Error> {
        let rows = sqlx::query_as::<_, (Uuid, String, String, String)>(
            r#"
            SELECT id, username, email, password
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to perform a query to retrieve users.")?;

        Ok(rows
            .into_iter()
            .map(|(id, username, email, password)| StoredUser {
                id,
                username,
                email,
                password: Secret::new(password),
            })
            .collect())
    }
}

// Rolled back by sqlx when dropped uncommitted
struct PgUnitOfWork {
    transaction: Transaction<'static, Postgres>,
}

#[async_trait]
impl UserUnitOfWork for PgUnitOfWork {
    #[tracing::instrument(skip_all, fields(username = %user.username))]
    async fn add(&mut self, user: &NewUser) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.password.expose_secret())
        .execute(&mut *self.transaction)
        .await
        .context("Failed to insert new user")?;
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn commit(self: Box<Self>) -> Result<(), anyhow::Error> {
        self.transaction
            .commit()
            .await
            .context("Failed to commit SQL transaction to store a new user")
    }
}
