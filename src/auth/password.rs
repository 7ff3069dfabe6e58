use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Argon2 PHC strings are recognised by this prefix; anything else stored in
/// `managers.password` is treated as plaintext.
const PHC_PREFIX: &str = "$argon2";

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify_password(password: &str, hashed: &str) -> Result<(), argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let parsed = PasswordHash::new(hashed)?;

    argon2.verify_password(password.as_bytes(), &parsed)
}

pub fn password_matches(supplied: &str, stored: &str) -> bool {
    if stored.starts_with(PHC_PREFIX) {
        verify_password(supplied, stored).is_ok()
    } else {
        supplied == stored
    }
}
