use crate::{
    application::{
        ports::{auth::CapabilityAuthorizer, directory::DirectoryProvider, CallerContext},
        services::{authentication::authenticate, AuthorizationHelper, MemberCountAggregator},
    },
    domain::{
        entities::*,
        errors::{DomainError, DomainResult, ProviderError},
        translation::to_provider_group,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn, Span};

/// Group management service implementing the create, get, update and list use cases
pub struct GroupManagementService {
    provider: Arc<dyn DirectoryProvider>,
    authorizer: Arc<dyn CapabilityAuthorizer>,
    member_counter: MemberCountAggregator,
}

#[async_trait]
impl AuthorizationHelper for GroupManagementService {
    fn authorizer(&self) -> &Arc<dyn CapabilityAuthorizer> {
        &self.authorizer
    }
}

impl GroupManagementService {
    pub fn new(
        provider: Arc<dyn DirectoryProvider>,
        authorizer: Arc<dyn CapabilityAuthorizer>,
    ) -> Self {
        let member_counter = MemberCountAggregator::new(provider.clone(), 1);
        Self {
            provider,
            authorizer,
            member_counter,
        }
    }

    /// Number of membership lookups kept in flight while listing
    pub fn with_member_count_concurrency(mut self, concurrency: usize) -> Self {
        self.member_counter = MemberCountAggregator::new(self.provider.clone(), concurrency);
        self
    }

    /// Create a new group
    #[instrument(skip(self, authorization, body), fields(realm, user, correlation_id))]
    pub async fn create_group(
        &self,
        authorization: Option<&str>,
        body: &[u8],
    ) -> DomainResult<CreatedGroup> {
        let caller = self.admit(authorization, GroupOperation::Create).await?;

        let group = bind_group(body)?;

        info!("Creating group '{}' in realm '{}'", group.short_name, caller.realm);

        let provider_group = to_provider_group(&group, None);
        let id = self
            .provider
            .create_group(&caller.token, &caller.realm, &provider_group)
            .await
            .map_err(|e| provider_failure(&caller, "createGroup", e))?;

        info!("Successfully created group '{}' with ID '{}'", group.short_name, id);
        Ok(CreatedGroup { id })
    }

    /// Update the group whose name matches `shortName` exactly
    #[instrument(skip(self, authorization, body), fields(realm, user, correlation_id))]
    pub async fn update_group(&self, authorization: Option<&str>, body: &[u8]) -> DomainResult<()> {
        let caller = self.admit(authorization, GroupOperation::Update).await?;

        let group = bind_group(body)?;

        info!("Updating group '{}' in realm '{}'", group.short_name, caller.realm);

        // Exact searches still return top-level ancestors with the match nested
        // in their subgroups, so the name is matched again here.
        let candidates = self
            .provider
            .get_groups(&caller.token, &caller.realm, &GroupSearch::exact(&group.short_name))
            .await
            .map_err(|e| provider_failure(&caller, "getGroups", e))?;

        let existing = ProviderGroup::find_named(&candidates, &group.short_name).ok_or_else(|| {
            DomainError::GroupNotExist {
                short_name: group.short_name.clone(),
                realm: caller.realm.clone(),
            }
        })?;

        let group_id = existing.id.clone().ok_or_else(|| DomainError::ProviderError {
            operation: "getGroups".to_string(),
            reason: format!("group '{}' returned without an id", group.short_name),
        })?;

        let provider_group = to_provider_group(&group, Some(group_id.clone()));
        self.provider
            .update_group(&caller.token, &caller.realm, &provider_group)
            .await
            .map_err(|e| provider_failure(&caller, "updateGroup", e))?;

        info!("Successfully updated group '{}' ({})", group.short_name, group_id);
        Ok(())
    }

    /// Get a single group by name with its member count.
    ///
    /// The name search is not exact; the first match wins.
    #[instrument(skip(self, authorization), fields(realm, user, correlation_id))]
    pub async fn get_group(
        &self,
        authorization: Option<&str>,
        short_name: Option<&str>,
    ) -> DomainResult<GroupDetail> {
        let caller = self.admit(authorization, GroupOperation::Get).await?;

        let short_name = short_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DomainError::MissingParameter {
                name: "shortName".to_string(),
            })?;

        info!("Getting group '{}' from realm '{}'", short_name, caller.realm);

        let first = self
            .provider
            .get_groups(&caller.token, &caller.realm, &GroupSearch::by_name(short_name))
            .await
            .map_err(|e| provider_failure(&caller, "getGroups", e))?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::GroupNotFound {
                short_name: short_name.to_string(),
                realm: caller.realm.clone(),
            })?;

        let path = first.path.clone().ok_or_else(|| DomainError::ProviderError {
            operation: "getGroups".to_string(),
            reason: format!("group matching '{short_name}' returned without a path"),
        })?;

        let group = self
            .provider
            .get_group_by_path(&caller.token, &caller.realm, &path)
            .await
            .map_err(|e| provider_failure(&caller, "getGroupByPath", e))?;

        let member_count = match group.id.as_deref().or(first.id.as_deref()) {
            Some(id) => {
                self.member_counter
                    .count_members(&caller.token, &caller.realm, id)
                    .await
            }
            None => 0,
        };

        info!("Found group '{}' with {} members", path, member_count);
        Ok(GroupDetail::from_provider(group, member_count))
    }

    /// List every group of the caller's realm with member counts
    #[instrument(skip(self, authorization), fields(realm, user, correlation_id))]
    pub async fn list_groups(&self, authorization: Option<&str>) -> DomainResult<GroupList> {
        let caller = self.admit(authorization, GroupOperation::List).await?;

        info!("Listing groups in realm '{}'", caller.realm);

        let groups = match self
            .provider
            .get_groups(&caller.token, &caller.realm, &GroupSearch::all())
            .await
        {
            Ok(groups) if !groups.is_empty() => groups,
            Ok(_) => {
                return Err(DomainError::UserNotFound {
                    realm: caller.realm.clone(),
                    reason: "directory returned no groups".to_string(),
                })
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Directory rejected caller token: {}", e);
                return Err(DomainError::TokenVerificationFailed {
                    realm: caller.realm.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                warn!("Failed to list groups: {}", e);
                return Err(DomainError::UserNotFound {
                    realm: caller.realm.clone(),
                    reason: e.to_string(),
                });
            }
        };

        let counts = self
            .member_counter
            .count_all(&caller.token, &caller.realm, &groups)
            .await;

        let entries: Vec<GroupListEntry> = groups
            .iter()
            .zip(counts)
            .map(|(group, count)| GroupListEntry::from_provider(group, count))
            .collect();

        info!("Found {} groups in realm '{}'", entries.len(), caller.realm);
        Ok(GroupList { groups: entries })
    }

    /// Authenticate the caller and check the operation's capabilities
    async fn admit(
        &self,
        authorization: Option<&str>,
        operation: GroupOperation,
    ) -> DomainResult<CallerContext> {
        let caller = authenticate(authorization)?;

        let span = Span::current();
        span.record("realm", caller.realm.as_str());
        span.record("user", caller.username.as_str());
        span.record("correlation_id", caller.correlation_id.as_str());

        self.require_capability(&caller, operation).await?;
        Ok(caller)
    }
}

fn bind_group(body: &[u8]) -> DomainResult<Group> {
    let request: GroupRequest =
        serde_json::from_slice(body).map_err(|e| DomainError::MalformedBody {
            message: e.to_string(),
        })?;
    request.into_group()
}

/// Keeps the directory's error shape out of client responses
fn provider_failure(caller: &CallerContext, operation: &str, error: ProviderError) -> DomainError {
    warn!(operation, "Directory call failed: {}", error);

    if error.is_unauthorized() {
        DomainError::TokenVerificationFailed {
            realm: caller.realm.clone(),
            reason: error.to_string(),
        }
    } else {
        DomainError::ProviderError {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }
}
