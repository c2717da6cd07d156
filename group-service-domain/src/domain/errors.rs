use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single entry of the error envelope returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl FieldError {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            field: None,
            detail: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Error codes surfaced in the response envelope
pub mod codes {
    pub const TOKEN_MISSING: &str = "token_missing";
    pub const CLAIM_MISSING: &str = "claim_missing";
    pub const REALM_NOT_FOUND: &str = "realm_not_found";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const MISSING: &str = "missing";
    pub const EMPTY: &str = "empty";
    pub const INVALID_JSON: &str = "invalid_json";
    pub const MISSING_PARAMETER: &str = "missing_parameter";
    pub const GROUP_NOT_FOUND: &str = "group_not_found";
    pub const NOT_EXIST: &str = "not_exist";
    pub const USER_NOT_FOUND: &str = "user_not_found";
    pub const TOKEN_VERIFICATION_FAILED: &str = "token_verification_failed";
    pub const DEPENDENCY_UNAVAILABLE: &str = "dependency_unavailable";
    pub const PROVIDER_ERROR: &str = "provider_error";
}

/// Domain-specific errors for group operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Authorization token missing or malformed")]
    TokenMissing,

    #[error("Claim missing from token: {claim}")]
    ClaimMissing { claim: String },

    #[error("Realm not found in issuer: {issuer}")]
    RealmNotFound { issuer: String },

    #[error("Authorization failed: user {user} lacks any of [{capabilities}]")]
    Unauthorized { user: String, capabilities: String },

    #[error("Validation failed: {} error(s)", errors.len())]
    ValidationFailed { errors: Vec<FieldError> },

    #[error("Malformed request body: {message}")]
    MalformedBody { message: String },

    #[error("Missing query parameter: {name}")]
    MissingParameter { name: String },

    #[error("Group not found: {short_name} in realm {realm}")]
    GroupNotFound { short_name: String, realm: String },

    #[error("Group does not exist: {short_name} in realm {realm}")]
    GroupNotExist { short_name: String, realm: String },

    #[error("No groups available in realm {realm}: {reason}")]
    UserNotFound { realm: String, reason: String },

    #[error("Token verification failed for realm {realm}: {reason}")]
    TokenVerificationFailed { realm: String, reason: String },

    #[error("Dependency unavailable: {dependency}")]
    DependencyUnavailable { dependency: String },

    #[error("Directory provider error during {operation}: {reason}")]
    ProviderError { operation: String, reason: String },
}

impl DomainError {
    /// Converts the error into the ordered messages of the error envelope
    pub fn messages(&self) -> Vec<FieldError> {
        match self {
            DomainError::TokenMissing => {
                vec![FieldError::new(codes::TOKEN_MISSING).with_field("Authorization")]
            }
            DomainError::ClaimMissing { claim } => {
                vec![FieldError::new(codes::CLAIM_MISSING).with_field(claim.clone())]
            }
            DomainError::RealmNotFound { issuer } => {
                vec![FieldError::new(codes::REALM_NOT_FOUND).with_detail(issuer.clone())]
            }
            DomainError::Unauthorized { .. } => vec![FieldError::new(codes::UNAUTHORIZED)],
            DomainError::ValidationFailed { errors } => errors.clone(),
            DomainError::MalformedBody { message } => {
                vec![FieldError::new(codes::INVALID_JSON).with_detail(message.clone())]
            }
            DomainError::MissingParameter { name } => {
                vec![FieldError::new(codes::MISSING_PARAMETER).with_field(name.clone())]
            }
            DomainError::GroupNotFound { realm, .. } => {
                vec![FieldError::new(codes::GROUP_NOT_FOUND)
                    .with_field("shortName")
                    .with_detail(realm.clone())]
            }
            DomainError::GroupNotExist { .. } => {
                vec![FieldError::new(codes::NOT_EXIST).with_field("shortName")]
            }
            // Provider reasons stay in logs; clients only see the realm.
            DomainError::UserNotFound { realm, .. } => {
                vec![FieldError::new(codes::USER_NOT_FOUND).with_field(realm.clone())]
            }
            DomainError::TokenVerificationFailed { realm, .. } => {
                vec![FieldError::new(codes::TOKEN_VERIFICATION_FAILED).with_field(realm.clone())]
            }
            DomainError::DependencyUnavailable { dependency } => {
                vec![FieldError::new(codes::DEPENDENCY_UNAVAILABLE).with_detail(dependency.clone())]
            }
            DomainError::ProviderError { operation, .. } => {
                vec![FieldError::new(codes::PROVIDER_ERROR).with_detail(operation.clone())]
            }
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Failures reported by the directory provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Failed to decode provider response: {message}")]
    Decode { message: String },
}

impl ProviderError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ProviderError::Unauthorized { .. })
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Authorization collaborator errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    #[error("Unknown capability: {capability}")]
    UnknownCapability { capability: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file error: {message}")]
    FileError { message: String },

    #[error("Operation {operation} requires unknown capability {capability}")]
    UnknownCapability { operation: String, capability: String },
}
