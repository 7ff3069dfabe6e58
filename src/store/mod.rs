pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use derive_more::Display;

use crate::model::customer::{Customer, CustomerDraft};

pub use memory::InMemoryCustomerStore;
pub use postgres::PgCustomerStore;

#[derive(Debug, Display)]
pub enum StoreError {
    /// A query expected to return exactly one row returned none.
    #[display(fmt = "item not found")]
    NotFound,
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
    #[display(fmt = "store unavailable: {}", _0)]
    Unavailable(String),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

/// Data access for the customers table.
///
/// Every operation is a single statement; nothing is retried.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn all(&self) -> Result<Vec<Customer>, StoreError>;

    async fn all_active(&self) -> Result<Vec<Customer>, StoreError>;

    async fn by_id(&self, id: i64) -> Result<Customer, StoreError>;

    /// Inserts when `draft.id == 0`, otherwise updates name and phone of the
    /// row with that id. Existence of the id is not checked up front; an
    /// update touching no row yields [`StoreError::NotFound`].
    async fn save(&self, draft: CustomerDraft) -> Result<Customer, StoreError>;

    /// Deletes the row and returns its last values.
    async fn remove_by_id(&self, id: i64) -> Result<Customer, StoreError>;

    async fn block_by_id(&self, id: i64) -> Result<Customer, StoreError>;

    async fn unblock_by_id(&self, id: i64) -> Result<Customer, StoreError>;
}
