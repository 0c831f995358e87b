use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

/// Verified in place of a stored hash when the username is unknown. Same
/// algorithm and cost as [`hasher`], so both login failures take as long.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1\
    $Y3JlZGl0c2NvcmUtc2FsdA$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

fn argon2_error(op: &'static str, e: password_hash::Error) -> anyhow::Error {
    error!(error = %e, op, "argon2 error");
    anyhow::anyhow!("{op}: {e}")
}

/// PHC string with a fresh random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| argon2_error("hash", e))
}

/// `Ok(false)` on mismatch, `Err` only when the stored hash cannot be parsed.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| argon2_error("parse", e))?;
    Ok(hasher().verify_password(plain.as_bytes(), &parsed).is_ok())
}

/// Check a login attempt. A missing account still runs one verification
/// against the decoy and then reports a mismatch.
pub fn verify_login(plain: &str, stored: Option<&str>) -> anyhow::Result<bool> {
    match stored {
        Some(hash) => verify_password(plain, hash),
        None => {
            verify_password(plain, DECOY_HASH)?;
            Ok(false)
        }
    }
}
