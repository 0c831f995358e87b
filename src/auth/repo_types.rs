use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,                   // unique user ID
    pub full_name: String,          // display name, defaults to username
    pub username: String,           // unique login name
    pub email: String,              // unique email
    pub password_hash: String,      // Argon2 PHC string
    pub created_at: OffsetDateTime, // creation timestamp
}

/// Fields written by signup.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
