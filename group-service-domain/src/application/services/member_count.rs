use crate::{
    application::ports::directory::DirectoryProvider,
    domain::{
        entities::{BearerToken, ProviderGroup},
        errors::ProviderResult,
    },
};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Computes member counts with one membership lookup per group.
///
/// A failed lookup degrades to a count of zero; a missing count never fails
/// the surrounding get or list request.
#[derive(Clone)]
pub struct MemberCountAggregator {
    provider: Arc<dyn DirectoryProvider>,
    concurrency: usize,
}

impl MemberCountAggregator {
    pub fn new(provider: Arc<dyn DirectoryProvider>, concurrency: usize) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    /// Raw lookup, errors included
    pub async fn try_count_members(
        &self,
        token: &BearerToken,
        realm: &str,
        group_id: &str,
    ) -> ProviderResult<usize> {
        self.provider
            .get_group_members(token, realm, group_id)
            .await
            .map(|members| members.len())
    }

    #[instrument(skip(self, token), fields(realm = %realm, group_id = %group_id))]
    pub async fn count_members(&self, token: &BearerToken, realm: &str, group_id: &str) -> usize {
        match self.try_count_members(token, realm, group_id).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Membership lookup failed, reporting zero members: {}", e);
                0
            }
        }
    }

    /// Counts for every group, in the same order as `groups`
    pub async fn count_all(
        &self,
        token: &BearerToken,
        realm: &str,
        groups: &[ProviderGroup],
    ) -> Vec<usize> {
        let lookups: Vec<_> = groups
            .iter()
            .map(|group| async move {
                match group.id.as_deref() {
                    Some(id) => self.count_members(token, realm, id).await,
                    None => {
                        warn!(group = ?group.name, "Group has no id, reporting zero members");
                        0
                    }
                }
            })
            .collect();
        stream::iter(lookups)
            .buffered(self.concurrency)
            .collect()
            .await
    }
}
