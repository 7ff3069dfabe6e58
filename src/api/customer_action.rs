//! Query-action flavour of the customers API: `/customers.<action>`, ids in
//! the query string, form-encoded save. Not behind the Basic auth gate.

use crate::{
    api::common::{parse_id, reply},
    errors::ApiError,
    model::customer::CustomerDraft,
    store::CustomerStore,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    fn required_id(&self) -> Result<i64, ApiError> {
        match self.id.as_deref() {
            Some(raw) => parse_id(raw),
            None => {
                warn!("Customer id missing from query");
                Err(ApiError::BadRequest)
            }
        }
    }
}

/// `id` is mandatory here even for creation; send `0` to create.
#[derive(Debug, Deserialize)]
pub struct SaveCustomerForm {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

pub async fn get_all(store: web::Data<dyn CustomerStore>) -> Result<HttpResponse, ApiError> {
    reply(store.all().await)
}

pub async fn get_all_active(
    store: web::Data<dyn CustomerStore>,
) -> Result<HttpResponse, ApiError> {
    reply(store.all_active().await)
}

pub async fn get_by_id(
    store: web::Data<dyn CustomerStore>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = query.required_id()?;

    reply(store.by_id(id).await)
}

pub async fn save(
    store: web::Data<dyn CustomerStore>,
    form: web::Form<SaveCustomerForm>,
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    let id = match form.id.as_deref() {
        Some(raw) => parse_id(raw)?,
        None => {
            warn!("Customer id missing from save form");
            return Err(ApiError::BadRequest);
        }
    };

    let result = store
        .save(CustomerDraft {
            id,
            name: form.name,
            phone: form.phone,
        })
        .await;

    if let Ok(customer) = &result {
        info!(customer_id = customer.id, "Customer saved");
    }
    reply(result)
}

pub async fn remove_by_id(
    store: web::Data<dyn CustomerStore>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = query.required_id()?;
    let result = store.remove_by_id(id).await;

    if result.is_ok() {
        info!(customer_id = id, "Customer removed");
    }
    reply(result)
}

pub async fn block_by_id(
    store: web::Data<dyn CustomerStore>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = query.required_id()?;

    reply(store.block_by_id(id).await)
}

pub async fn unblock_by_id(
    store: web::Data<dyn CustomerStore>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = query.required_id()?;

    reply(store.unblock_by_id(id).await)
}
