use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Ann",
        "phone": "+1000",
        "active": true,
        "created": "2026-01-01T00:00:00Z"
    })
)]
pub struct Customer {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Ann")]
    pub name: String,

    #[schema(example = "+1000")]
    pub phone: String,

    #[schema(example = true)]
    pub active: bool,

    #[schema(example = "2026-01-01T00:00:00Z", value_type = String, format = DateTime)]
    pub created: DateTime<Utc>,
}

/// Input of a save operation. `id == 0` means "create", anything else is an
/// update of the row carrying that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

impl CustomerDraft {
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}
