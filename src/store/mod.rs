//! Account persistence subsystem.
//!
//! # Data Flow
//! ```text
//! route handler (validated params)
//!     → Store trait (one call per request)
//!     → postgres.rs (sqlx pool, one statement per operation)
//!       or memory.rs (ordered map, local runs and tests)
//!     → Account row or StoreError
//! ```
//!
//! # Design Decisions
//! - Handlers only see `Arc<dyn Store>`; the backend is chosen at startup
//! - A missing row is always `StoreError::NotFound`, including on delete
//! - Ids are assigned by the store and never reused

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A persisted bank account row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct CreateAccountParams {
    pub owner: String,
    pub balance: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ListAccountsParams {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateAccountParams {
    pub id: i64,
    pub balance: i64,
}

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The addressed row does not exist.
    #[error("no rows in result set")]
    NotFound,

    /// Any other backend failure; the text is surfaced to clients as-is.
    #[error("{0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// CRUD operations over persisted accounts.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError>;

    async fn get_account(&self, id: i64) -> Result<Account, StoreError>;

    /// Accounts ordered by id, skipping `offset` rows and returning at most `limit`.
    async fn list_accounts(&self, params: ListAccountsParams) -> Result<Vec<Account>, StoreError>;

    /// Replace the balance of an existing account. Other fields are untouched.
    async fn update_account(&self, params: UpdateAccountParams) -> Result<Account, StoreError>;

    async fn delete_account(&self, id: i64) -> Result<(), StoreError>;
}
