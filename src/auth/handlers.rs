use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, SignupRequest, SignupResponse},
        extractors::AuthUser,
        services,
    },
    error::AuthError,
    state::AppState,
};

/// Routes open to anonymous callers.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Routes that require a bearer token; guarded by the `AuthUser` extractor.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected request body");
        AuthError::validation("Invalid JSON body.")
    })
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), AuthError> {
    let payload = json_body(payload)?;
    services::signup(&state, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully!".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let payload = json_body(payload)?;
    let (username, token) = services::login(&state, &payload).await?;

    Ok(Json(LoginResponse {
        message: "Login successful!".into(),
        username,
        token,
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Result<Json<PublicUser>, AuthError> {
    let user = services::profile(&state, &username).await?;
    Ok(Json(user))
}
