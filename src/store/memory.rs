//! In-memory account store.
//!
//! Rows live in a `BTreeMap` keyed by id so listing is naturally ordered.
//! Used for local runs without a database and by the test suites.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    Account, CreateAccountParams, ListAccountsParams, Store, StoreError, UpdateAccountParams,
};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Account>,
    last_id: i64,
}

/// Account store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let account = Account {
            id: table.last_id,
            owner: params.owner,
            balance: params.balance,
            currency: params.currency,
        };
        table.rows.insert(account.id, account.clone());

        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_accounts(&self, params: ListAccountsParams) -> Result<Vec<Account>, StoreError> {
        if params.limit < 0 || params.offset < 0 {
            return Err(StoreError::Database(
                "LIMIT and OFFSET must not be negative".to_string(),
            ));
        }

        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .skip(params.offset as usize)
            .take(params.limit as usize)
            .cloned()
            .collect())
    }

    async fn update_account(&self, params: UpdateAccountParams) -> Result<Account, StoreError> {
        let mut table = self.table.write().await;
        let account = table.rows.get_mut(&params.id).ok_or(StoreError::NotFound)?;
        account.balance = params.balance;
        Ok(account.clone())
    }

    async fn delete_account(&self, id: i64) -> Result<(), StoreError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(owner: &str) -> CreateAccountParams {
        CreateAccountParams {
            owner: owner.to_string(),
            balance: 0,
            currency: "USD".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_never_reused() {
        let store = MemoryStore::new();
        let a = store.create_account(params("a")).await.unwrap();
        let b = store.create_account(params("b")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        store.delete_account(b.id).await.unwrap();
        let c = store.create_account(params("c")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn test_list_pages_in_id_order() {
        let store = MemoryStore::new();
        for i in 0..7 {
            store.create_account(params(&format!("owner-{i}"))).await.unwrap();
        }

        let page = store
            .list_accounts(ListAccountsParams { limit: 5, offset: 5 })
            .await
            .unwrap();
        let ids: Vec<i64> = page.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![6, 7]);
    }

    #[tokio::test]
    async fn test_update_only_touches_balance() {
        let store = MemoryStore::new();
        let created = store.create_account(params("alice")).await.unwrap();

        let updated = store
            .update_account(UpdateAccountParams { id: created.id, balance: 250 })
            .await
            .unwrap();
        assert_eq!(updated.balance, 250);
        assert_eq!(updated.owner, created.owner);
        assert_eq!(updated.currency, created.currency);
        assert_eq!(store.get_account(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.get_account(1).await, Err(StoreError::NotFound)));
        assert!(matches!(
            store.update_account(UpdateAccountParams { id: 1, balance: 5 }).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.delete_account(1).await, Err(StoreError::NotFound)));
        assert!(store.is_empty().await);
    }
}
