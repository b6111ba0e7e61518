//! PostgreSQL account store.
//!
//! One SQL statement per operation against the `accounts` table:
//!
//! ```sql
//! CREATE TABLE accounts (
//!   id       BIGSERIAL PRIMARY KEY,
//!   owner    VARCHAR NOT NULL,
//!   balance  BIGINT  NOT NULL,
//!   currency VARCHAR NOT NULL
//! );
//! ```
//!
//! The schema is owned by the deployment; this crate does not migrate it.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{
    Account, CreateAccountParams, ListAccountsParams, Store, StoreError, UpdateAccountParams,
};
use crate::config::DatabaseConfig;

const CREATE_ACCOUNT: &str = "INSERT INTO accounts (owner, balance, currency) \
     VALUES ($1, $2, $3) \
     RETURNING id, owner, balance, currency";

const GET_ACCOUNT: &str = "SELECT id, owner, balance, currency FROM accounts WHERE id = $1 LIMIT 1";

const LIST_ACCOUNTS: &str = "SELECT id, owner, balance, currency FROM accounts \
     ORDER BY id \
     LIMIT $1 OFFSET $2";

const UPDATE_ACCOUNT: &str = "UPDATE accounts SET balance = $2 WHERE id = $1 \
     RETURNING id, owner, balance, currency";

const DELETE_ACCOUNT: &str = "DELETE FROM accounts WHERE id = $1";

/// Account store backed by a sqlx connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration and verify one connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database pool connected"
        );

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(CREATE_ACCOUNT)
            .bind(params.owner)
            .bind(params.balance)
            .bind(params.currency)
            .fetch_one(&self.pool)
            .await?;
        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(GET_ACCOUNT)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(account)
    }

    async fn list_accounts(&self, params: ListAccountsParams) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as::<_, Account>(LIST_ACCOUNTS)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(accounts)
    }

    async fn update_account(&self, params: UpdateAccountParams) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(UPDATE_ACCOUNT)
            .bind(params.id)
            .bind(params.balance)
            .fetch_one(&self.pool)
            .await?;
        Ok(account)
    }

    async fn delete_account(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(DELETE_ACCOUNT).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
