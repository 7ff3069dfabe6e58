use std::sync::Arc;

use actix_web::middleware::{NormalizePath, from_fn};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod errors;
mod model;
mod routes;
mod store;
mod utils;

#[cfg(test)]
mod test_utils;

use auth::verifier::{CredentialVerifier, InMemoryCredentialVerifier, PgCredentialVerifier};
use config::{Config, StorageBackend};
use db::init_db;
use store::{CustomerStore, InMemoryCustomerStore, PgCustomerStore};

use crate::docs::ApiDoc;
use crate::utils::{check_header::check_header, request_log::request_log};
use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // `customers-api hash-password <password>` prints a PHC string for the
    // managers table and exits.
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("hash-password") {
        let password = args.next().context("usage: hash-password <password>")?;
        let hashed = auth::password::hash_password(&password)
            .map_err(|e| anyhow::anyhow!("hashing failed: {e}"))?;
        println!("{hashed}");
        return Ok(());
    }

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    if let Err(e) = run(config).await {
        error!(error = %format!("{e:#}"), "Server stopped with error");
        return Err(e);
    }
    Ok(())
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!(
        addr = %config.server_addr,
        storage = %config.storage,
        router = %config.router_variant,
        "Server starting..."
    );

    let (customers, verifier): (Arc<dyn CustomerStore>, Arc<dyn CredentialVerifier>) =
        match config.storage {
            StorageBackend::Postgres => {
                let pool = init_db(&config.database_url, config.db_max_connections)
                    .await
                    .context("failed to connect to database")?;
                (
                    Arc::new(PgCustomerStore::new(pool.clone())),
                    Arc::new(PgCredentialVerifier::new(pool)),
                )
            }
            StorageBackend::Memory => (
                Arc::new(InMemoryCustomerStore::new()),
                Arc::new(InMemoryCredentialVerifier::new(
                    config.memory_managers.clone(),
                )),
            ),
        };

    let server_addr = config.server_addr.clone();
    let variant = config.router_variant;

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(check_header))
            .wrap(from_fn(request_log))
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(customers.clone()))
            .app_data(Data::from(verifier.clone()))
            .app_data(Data::new(config.clone()))
            .configure(|cfg| routes::configure(cfg, variant))
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
