use crate::{
    application::ports::auth::{AuthorizationRequest, CallerContext, CapabilityAuthorizer},
    domain::{
        entities::GroupOperation,
        errors::{DomainError, DomainResult},
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Centralized, fail-closed capability checking for services
#[async_trait]
pub trait AuthorizationHelper {
    /// Get the authorization collaborator
    fn authorizer(&self) -> &Arc<dyn CapabilityAuthorizer>;

    /// Denies with `Unauthorized` unless the collaborator explicitly allows
    async fn require_capability(
        &self,
        caller: &CallerContext,
        operation: GroupOperation,
    ) -> DomainResult<()> {
        let needed = operation.required_capabilities();
        let request = AuthorizationRequest::new(caller.username.clone(), needed);

        let allowed = match self.authorizer().authorize(&request).await {
            Ok(allowed) => allowed,
            Err(e) => {
                warn!(user = %caller.username, %operation, "Authorization check failed: {}", e);
                false
            }
        };

        if !allowed {
            debug!(user = %caller.username, %operation, "Caller lacks required capability");
            return Err(DomainError::Unauthorized {
                user: caller.username.clone(),
                capabilities: needed
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        Ok(())
    }
}
