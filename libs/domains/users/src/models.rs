use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account roles
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

/// What an admin wants done to another account's role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoleAction {
    Grant,
    Revoke,
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique, compared exactly as stored
    pub email: String,
    /// Argon2 PHC string, never sent to clients
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Signup payload. Fields are optional on the wire so a missing one yields
/// "All fields required" instead of a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "Asha")]
    pub name: Option<String>,
    #[schema(example = "asha@example.edu")]
    pub email: Option<String>,
    #[schema(example = "s3cret")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login: a bearer token and the role to render the UI for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Role change payload. `action` stays a raw string so unknown values map
/// to "Invalid request" like a missing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SetRoleRequest {
    #[schema(example = "asha@example.edu")]
    pub email: Option<String>,
    #[schema(example = "grant")]
    pub action: Option<String>,
}
