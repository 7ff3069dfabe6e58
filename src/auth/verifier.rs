use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::auth::password::password_matches;
use crate::model::manager::Manager;

/// Answers whether a login/password pair belongs to a manager.
///
/// Implementations fail closed: a lookup error is reported as `false`, the
/// same as wrong credentials.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, login: &str, password: &str) -> bool;
}

pub struct PgCredentialVerifier {
    pool: PgPool,
}

impl PgCredentialVerifier {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialVerifier for PgCredentialVerifier {
    async fn verify(&self, login: &str, password: &str) -> bool {
        let managers = match sqlx::query_as::<_, Manager>(
            r#"
            SELECT id, login, password
            FROM managers
            WHERE login = $1
            "#,
        )
        .bind(login)
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Manager lookup failed, rejecting credentials");
                return false;
            }
        };

        let accepted = single_match(&managers, password);
        if let Some(manager) = accepted {
            debug!(manager_id = manager.id, login = %manager.login, "Credentials accepted");
        }
        accepted.is_some()
    }
}

/// The manager the credentials belong to, provided the login matched exactly
/// one row and its stored password matches.
fn single_match<'a>(managers: &'a [Manager], password: &str) -> Option<&'a Manager> {
    match managers {
        [manager] if password_matches(password, &manager.password) => Some(manager),
        _ => None,
    }
}

/// Login → stored password map. Stored values may be plaintext or Argon2 PHC
/// strings, exactly like the `managers` table.
#[derive(Debug, Default)]
pub struct InMemoryCredentialVerifier {
    managers: HashMap<String, String>,
}

impl InMemoryCredentialVerifier {
    pub fn new<I, L, P>(managers: I) -> Self
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: Into<String>,
    {
        Self {
            managers: managers
                .into_iter()
                .map(|(login, password)| (login.into(), password.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryCredentialVerifier {
    async fn verify(&self, login: &str, password: &str) -> bool {
        self.managers
            .get(login)
            .is_some_and(|stored| password_matches(password, stored))
    }
}
