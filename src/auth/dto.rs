use serde::{Deserialize, Serialize};

/// Request body for user signup. Missing fields deserialize as `None` so the
/// validator, not the JSON extractor, decides the error message.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
    pub token: String,
}

/// Public part of the user returned by `/me`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicUser {
    pub username: String,
    pub full_name: String,
    pub email: String,
}
