use crate::core::errors::FimdefestaError;
use crate::core::models::{audit::GroupAudit, group::Group, user::User};
use async_trait::async_trait;

/// Persistence boundary. Groups are stored as whole documents (participants
/// and items inline), mirroring the key-value layout the app started with.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user_if_not_exists(&self, user: User) -> Result<User, FimdefestaError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, FimdefestaError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, FimdefestaError>;
    async fn save_group(&self, group: Group) -> Result<(), FimdefestaError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, FimdefestaError>;
    async fn delete_group(&self, group_id: &str) -> Result<(), FimdefestaError>;
    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, FimdefestaError>;
    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), FimdefestaError>;
    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, FimdefestaError>;
}

pub mod in_memory;
