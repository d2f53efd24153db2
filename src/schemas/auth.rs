use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

/// Successful login: the user row (password elided) merged with the
/// role-specific detail record.
#[derive(Debug, Serialize)]
pub(crate) struct LoginResponse {
    pub(crate) message: String,
    pub(crate) user: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangePasswordRequest {
    pub(crate) email: String,
    #[serde(alias = "oldPassword")]
    pub(crate) old_password: String,
    #[serde(alias = "newPassword")]
    pub(crate) new_password: String,
}
