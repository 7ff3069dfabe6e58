use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{CustomerStore, StoreError};
use crate::model::customer::{Customer, CustomerDraft};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Customer>,
}

/// In-memory customers table.
///
/// Used by the `memory` storage backend and by tests. Ids are assigned from a
/// monotonically increasing counter starting at 1 and never reused.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    table: RwLock<Table>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, StoreError> {
        self.table
            .read()
            .map_err(|_| StoreError::Unavailable("customers table lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, StoreError> {
        self.table
            .write()
            .map_err(|_| StoreError::Unavailable("customers table lock poisoned".into()))
    }

    fn set_active(&self, id: i64, active: bool) -> Result<Customer, StoreError> {
        let mut table = self.write()?;
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.active = active;
        Ok(row.clone())
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn all(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn all_active(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|c| c.active)
            .cloned()
            .collect())
    }

    async fn by_id(&self, id: i64) -> Result<Customer, StoreError> {
        self.read()?
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save(&self, draft: CustomerDraft) -> Result<Customer, StoreError> {
        let mut table = self.write()?;

        if draft.is_new() {
            table.last_id += 1;
            let customer = Customer {
                id: table.last_id,
                name: draft.name,
                phone: draft.phone,
                active: true,
                created: Utc::now(),
            };
            table.rows.insert(customer.id, customer.clone());
            return Ok(customer);
        }

        let row = table.rows.get_mut(&draft.id).ok_or(StoreError::NotFound)?;
        row.name = draft.name;
        row.phone = draft.phone;
        Ok(row.clone())
    }

    async fn remove_by_id(&self, id: i64) -> Result<Customer, StoreError> {
        self.write()?.rows.remove(&id).ok_or(StoreError::NotFound)
    }

    async fn block_by_id(&self, id: i64) -> Result<Customer, StoreError> {
        self.set_active(id, false)
    }

    async fn unblock_by_id(&self, id: i64) -> Result<Customer, StoreError> {
        self.set_active(id, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: i64, name: &str, phone: &str) -> CustomerDraft {
        CustomerDraft {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
        }
    }

    #[actix_web::test]
    async fn save_without_id_assigns_fresh_ids() {
        let store = InMemoryCustomerStore::new();

        let first = store.save(draft(0, "Ann", "+1000")).await.unwrap();
        let second = store.save(draft(0, "Bob", "+2000")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.active && second.active);
    }

    #[actix_web::test]
    async fn update_keeps_created_and_active() {
        let store = InMemoryCustomerStore::new();
        let created = store.save(draft(0, "Ann", "+1000")).await.unwrap();
        store.block_by_id(created.id).await.unwrap();

        let updated = store.save(draft(created.id, "Anna", "+1001")).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Anna");
        assert_eq!(updated.phone, "+1001");
        assert_eq!(updated.created, created.created);
        assert!(!updated.active);
    }

    #[actix_web::test]
    async fn update_of_unknown_id_is_not_found() {
        let store = InMemoryCustomerStore::new();

        let err = store.save(draft(42, "Ghost", "")).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound));
        assert!(store.all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn ids_are_not_reused_after_remove() {
        let store = InMemoryCustomerStore::new();
        let first = store.save(draft(0, "Ann", "+1000")).await.unwrap();
        store.remove_by_id(first.id).await.unwrap();

        let next = store.save(draft(0, "Bob", "+2000")).await.unwrap();

        assert_eq!(next.id, 2);
        assert!(matches!(
            store.by_id(first.id).await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[actix_web::test]
    async fn active_listing_is_the_active_subset() {
        let store = InMemoryCustomerStore::new();
        for name in ["a", "b", "c", "d", "e"] {
            store.save(draft(0, name, "")).await.unwrap();
        }
        store.block_by_id(2).await.unwrap();
        store.block_by_id(4).await.unwrap();
        store.block_by_id(5).await.unwrap();
        store.unblock_by_id(5).await.unwrap();

        let all = store.all().await.unwrap();
        let active = store.all_active().await.unwrap();
        let expected: Vec<_> = all.into_iter().filter(|c| c.active).collect();

        assert_eq!(active, expected);
        assert_eq!(
            active.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 3, 5]
        );
    }

    #[actix_web::test]
    async fn toggles_on_missing_rows_are_not_found() {
        let store = InMemoryCustomerStore::new();

        assert!(matches!(store.block_by_id(7).await, Err(StoreError::NotFound)));
        assert!(matches!(store.unblock_by_id(7).await, Err(StoreError::NotFound)));
        assert!(matches!(store.remove_by_id(7).await, Err(StoreError::NotFound)));
    }
}
