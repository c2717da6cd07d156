use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::application::ports::auth::{AuthorizationRequest, CapabilityAuthorizer};
use crate::domain::{
    entities::{Capability, CapabilityRegistry},
    errors::{AuthError, ConfigError},
};

const WILDCARD: &str = "*";

#[derive(Debug, Clone, Default)]
struct Grant {
    all: bool,
    capabilities: HashSet<Capability>,
}

/// Authorizer backed by a fixed user -> capability table from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilityAuthorizer {
    grants: HashMap<String, Grant>,
}

impl StaticCapabilityAuthorizer {
    /// Every granted name must be registered, otherwise startup fails
    pub fn from_grants(
        grants: &HashMap<String, Vec<String>>,
        registry: &CapabilityRegistry,
    ) -> Result<Self, ConfigError> {
        let mut table = HashMap::new();

        for (user, names) in grants {
            let mut grant = Grant::default();
            for name in names {
                if name == WILDCARD {
                    grant.all = true;
                    continue;
                }
                let capability = registry.lookup(name).map_err(|e| ConfigError::InvalidValue {
                    key: "CAPABILITY_GRANTS".to_string(),
                    message: format!("user {user}: {e}"),
                })?;
                grant.capabilities.insert(capability);
            }
            table.insert(user.clone(), grant);
        }

        Ok(Self { grants: table })
    }

    pub fn grant(mut self, user: impl Into<String>, capabilities: &[Capability]) -> Self {
        self.grants
            .entry(user.into())
            .or_default()
            .capabilities
            .extend(capabilities.iter().copied());
        self
    }
}

#[async_trait]
impl CapabilityAuthorizer for StaticCapabilityAuthorizer {
    async fn authorize(&self, request: &AuthorizationRequest) -> Result<bool, AuthError> {
        let Some(grant) = self.grants.get(&request.user) else {
            debug!(user = %request.user, "No capability grants configured for user");
            return Ok(false);
        };

        Ok(grant.all
            || request
                .capabilities_needed
                .iter()
                .any(|capability| grant.capabilities.contains(capability)))
    }
}
