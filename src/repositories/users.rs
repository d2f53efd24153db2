use async_trait::async_trait;

use crate::db::models::User;
use crate::db::types::UserRole;
use crate::repositories::StoreResult;

/// Credential records (`users` table) plus the per-role profile tables.
#[async_trait]
pub(crate) trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// The role-specific profile row (from `students` / `professors` /
    /// `admins`), shape owned by the store.
    async fn role_details(
        &self,
        role: UserRole,
        user_id: &str,
    ) -> StoreResult<Option<serde_json::Value>>;

    /// Overwrite the stored credential with a freshly hashed value.
    async fn set_password(&self, user_id: &str, stored: &str) -> StoreResult<()>;
}
