use std::{future::Future, time::Duration};

use tracing::{error, info, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, SignupRequest},
        password::{hash_password, verify_login},
        repo::StoreError,
        repo_types::NewUser,
        validation::{validate_login, validate_signup},
    },
    error::AuthError,
    state::AppState,
};

/// Bound a user-store call by the configured timeout.
async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, AuthError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(AuthError::from),
        Err(_) => {
            error!(timeout_ms = limit.as_millis() as u64, "user store call timed out");
            Err(AuthError::Timeout)
        }
    }
}

/// Validate, reject duplicates, hash, insert. Nothing is written on any error.
pub async fn signup(state: &AppState, req: &SignupRequest) -> Result<(), AuthError> {
    let valid = validate_signup(
        req.full_name.as_deref(),
        req.username.as_deref(),
        req.email.as_deref(),
        req.password.as_deref(),
    )
    .map_err(|e| {
        warn!(error = %e, "signup validation failed");
        e
    })?;

    let limit = state.config.store_timeout;
    let existing = bounded(
        limit,
        state
            .store
            .find_user_by_username_or_email(valid.username, valid.email),
    )
    .await?;
    if existing.is_some() {
        warn!(username = %valid.username, "username or email already registered");
        return Err(AuthError::Conflict);
    }

    let password_hash = hash_password(valid.password)?;

    let user = bounded(
        limit,
        state.store.insert_user(NewUser {
            full_name: valid.full_name.to_string(),
            username: valid.username.to_string(),
            email: valid.email.to_string(),
            password_hash,
        }),
    )
    .await
    .map_err(|e| match e {
        // lost the race against a concurrent signup
        AuthError::Store(StoreError::Conflict) => AuthError::Conflict,
        other => other,
    })?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(())
}

/// Returns `(username, token)`. Unknown user and wrong password are
/// indistinguishable to the caller.
pub async fn login(state: &AppState, req: &LoginRequest) -> Result<(String, String), AuthError> {
    let (username, password) = validate_login(req.username.as_deref(), req.password.as_deref())
        .map_err(|e| {
            warn!(error = %e, "login validation failed");
            e
        })?;

    let stored = bounded(
        state.config.store_timeout,
        state.store.find_password_hash_by_username(username),
    )
    .await?;

    match verify_login(password, stored.as_deref()) {
        Ok(true) => {}
        Ok(false) if stored.is_none() => {
            warn!(username = %username, "login unknown username");
            return Err(AuthError::InvalidCredentials);
        }
        Ok(false) => {
            warn!(username = %username, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, username = %username, "stored password hash unreadable");
            return Err(AuthError::InvalidCredentials);
        }
    }

    let token = state.keys.sign(username)?;
    info!(username = %username, "user logged in");
    Ok((username.to_string(), token))
}

pub async fn profile(state: &AppState, username: &str) -> Result<PublicUser, AuthError> {
    let user = bounded(
        state.config.store_timeout,
        state.store.find_user_by_username(username),
    )
    .await?
    .ok_or_else(|| {
        warn!(username = %username, "token subject not found");
        AuthError::unauthorized("Invalid or expired token")
    })?;

    Ok(PublicUser {
        username: user.username,
        full_name: user.full_name,
        email: user.email,
    })
}
