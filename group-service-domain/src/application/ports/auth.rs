use crate::domain::{
    entities::{BearerToken, Capability},
    errors::AuthError,
};
use async_trait::async_trait;

/// Per-request capability check sent to the authorization collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub user: String,
    pub capabilities_needed: Vec<Capability>,
}

impl AuthorizationRequest {
    pub fn new(user: impl Into<String>, capabilities_needed: &[Capability]) -> Self {
        Self {
            user: user.into(),
            capabilities_needed: capabilities_needed.to_vec(),
        }
    }
}

/// Authorization collaborator port.
///
/// Returns `Ok(true)` when the user holds at least one of the needed
/// capabilities. Callers treat both `Ok(false)` and `Err(_)` as a denial.
#[async_trait]
pub trait CapabilityAuthorizer: Send + Sync {
    async fn authorize(&self, request: &AuthorizationRequest) -> Result<bool, AuthError>;
}

/// Authenticated caller, produced by the shared request prefix
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub token: BearerToken,
    pub username: String,
    pub realm: String,
    pub correlation_id: String,
}

impl CallerContext {
    pub fn new(token: BearerToken, username: String, realm: String) -> Self {
        Self {
            token,
            username,
            realm,
            correlation_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}
