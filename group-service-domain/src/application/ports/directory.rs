use crate::domain::{
    entities::{BearerToken, GroupMember, GroupSearch, ProviderGroup},
    errors::ProviderResult,
};
use async_trait::async_trait;

/// Directory provider port. Every call runs with the caller's own token.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Create a group and return the identifier assigned by the directory
    async fn create_group(
        &self,
        token: &BearerToken,
        realm: &str,
        group: &ProviderGroup,
    ) -> ProviderResult<String>;

    /// Replace the group identified by `group.id`
    async fn update_group(
        &self,
        token: &BearerToken,
        realm: &str,
        group: &ProviderGroup,
    ) -> ProviderResult<()>;

    async fn get_groups(
        &self,
        token: &BearerToken,
        realm: &str,
        search: &GroupSearch,
    ) -> ProviderResult<Vec<ProviderGroup>>;

    async fn get_group_by_path(
        &self,
        token: &BearerToken,
        realm: &str,
        path: &str,
    ) -> ProviderResult<ProviderGroup>;

    async fn get_group_members(
        &self,
        token: &BearerToken,
        realm: &str,
        group_id: &str,
    ) -> ProviderResult<Vec<GroupMember>>;
}
