use std::fmt;

/// Credential row. Nothing besides login and password is read.
#[derive(sqlx::FromRow)]
pub struct Manager {
    pub id: i64,
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_password() {
        let manager = Manager {
            id: 1,
            login: "admin".into(),
            password: "secret".into(),
        };

        let printed = format!("{manager:?}");
        assert!(printed.contains("admin"));
        assert!(!printed.contains("secret"));
    }
}
