use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error};

use super::{CustomerStore, StoreError};
use crate::model::customer::{Customer, CustomerDraft};

pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_list(&self, sql: &'static str) -> Result<Vec<Customer>, StoreError> {
        sqlx::query_as::<_, Customer>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify(e, "list customers"))
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<Customer, StoreError> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET active = $1
            WHERE id = $2
            RETURNING id, name, phone, active, created
            "#,
        )
        .bind(active)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "toggle customer"))
    }
}

/// Maps the driver error onto the store taxonomy. Only real failures are
/// logged; a missing row is an expected outcome.
fn classify(e: sqlx::Error, operation: &'static str) -> StoreError {
    let err = StoreError::from(e);
    match &err {
        StoreError::NotFound => debug!(operation, "No matching customer row"),
        other => error!(error = %other, operation, "Customer query failed"),
    }
    err
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn all(&self) -> Result<Vec<Customer>, StoreError> {
        self.fetch_list(
            r#"
            SELECT id, name, phone, active, created
            FROM customers
            ORDER BY id
            "#,
        )
        .await
    }

    async fn all_active(&self) -> Result<Vec<Customer>, StoreError> {
        self.fetch_list(
            r#"
            SELECT id, name, phone, active, created
            FROM customers
            WHERE active
            ORDER BY id
            "#,
        )
        .await
    }

    async fn by_id(&self, id: i64) -> Result<Customer, StoreError> {
        sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, active, created
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "get customer"))
    }

    async fn save(&self, draft: CustomerDraft) -> Result<Customer, StoreError> {
        if draft.is_new() {
            return sqlx::query_as::<_, Customer>(
                r#"
                INSERT INTO customers (name, phone)
                VALUES ($1, $2)
                RETURNING id, name, phone, active, created
                "#,
            )
            .bind(&draft.name)
            .bind(&draft.phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, "create customer"));
        }

        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $1, phone = $2
            WHERE id = $3
            RETURNING id, name, phone, active, created
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.phone)
        .bind(draft.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "update customer"))
    }

    async fn remove_by_id(&self, id: i64) -> Result<Customer, StoreError> {
        sqlx::query_as::<_, Customer>(
            r#"
            DELETE FROM customers
            WHERE id = $1
            RETURNING id, name, phone, active, created
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "remove customer"))
    }

    async fn block_by_id(&self, id: i64) -> Result<Customer, StoreError> {
        self.set_active(id, false).await
    }

    async fn unblock_by_id(&self, id: i64) -> Result<Customer, StoreError> {
        self.set_active(id, true).await
    }
}
