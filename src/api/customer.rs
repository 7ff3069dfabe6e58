use crate::{
    api::common::{parse_id, reply},
    errors::ApiError,
    model::customer::CustomerDraft,
    store::CustomerStore,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveCustomer {
    /// Absent or 0 creates a new customer, anything else updates that row
    #[schema(example = 0, nullable = true)]
    #[serde(default)]
    pub id: Option<i64>,
    #[schema(example = "Ann")]
    #[serde(default)]
    pub name: String,
    #[schema(example = "+1000")]
    #[serde(default)]
    pub phone: String,
}

impl From<SaveCustomer> for CustomerDraft {
    fn from(body: SaveCustomer) -> Self {
        CustomerDraft {
            id: body.id.unwrap_or(0),
            name: body.name,
            phone: body.phone,
        }
    }
}

/// List all customers
#[utoipa::path(
    get,
    path = "/customers",
    responses(
        (status = 200, description = "Every customer, active or not", body = [crate::model::customer::Customer]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Customers",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn list_customers(
    store: web::Data<dyn CustomerStore>,
) -> Result<HttpResponse, ApiError> {
    reply(store.all().await)
}

/// List active customers
#[utoipa::path(
    get,
    path = "/customers/active",
    responses(
        (status = 200, description = "Customers that are not blocked", body = [crate::model::customer::Customer]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Customers",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn list_active_customers(
    store: web::Data<dyn CustomerStore>,
) -> Result<HttpResponse, ApiError> {
    reply(store.all_active().await)
}

/// Get customer by id
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer found", body = crate::model::customer::Customer),
        (status = 400, description = "Id is not an integer"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Customers",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn get_customer(
    store: web::Data<dyn CustomerStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    reply(store.by_id(id).await)
}

/// Create or update a customer
#[utoipa::path(
    post,
    path = "/customers",
    request_body(
        content = SaveCustomer,
        description = "Customer fields; include a non-zero id to update",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Saved customer", body = crate::model::customer::Customer),
        (status = 400, description = "Body is not valid JSON"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No customer with the given id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Customers",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn save_customer(
    store: web::Data<dyn CustomerStore>,
    payload: web::Json<SaveCustomer>,
) -> Result<HttpResponse, ApiError> {
    let draft = CustomerDraft::from(payload.into_inner());
    let result = store.save(draft).await;

    if let Ok(customer) = &result {
        info!(customer_id = customer.id, "Customer saved");
    }
    reply(result)
}

/// Remove customer by id
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Removed customer, as it was", body = crate::model::customer::Customer),
        (status = 400, description = "Id is not an integer"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Customers",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn remove_customer(
    store: web::Data<dyn CustomerStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    let result = store.remove_by_id(id).await;

    if result.is_ok() {
        info!(customer_id = id, "Customer removed");
    }
    reply(result)
}

/// Block customer
#[utoipa::path(
    post,
    path = "/customers/{id}/block",
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer with active = false", body = crate::model::customer::Customer),
        (status = 400, description = "Id is not an integer"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Customers",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn block_customer(
    store: web::Data<dyn CustomerStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    reply(store.block_by_id(id).await)
}

/// Unblock customer
#[utoipa::path(
    delete,
    path = "/customers/{id}/block",
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer with active = true", body = crate::model::customer::Customer),
        (status = 400, description = "Id is not an integer"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Customers",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn unblock_customer(
    store: web::Data<dyn CustomerStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    reply(store.unblock_by_id(id).await)
}
