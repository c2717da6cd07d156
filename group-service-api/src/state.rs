use crate::{config::Config, error::AppError};
use group_service_domain::{
    CapabilityRegistry, ConfigError, DomainError, GroupManagementService, KeycloakRestAdapter,
    StaticCapabilityAuthorizer,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    // None when no directory provider is configured
    pub group_service: Option<Arc<GroupManagementService>>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let registry = CapabilityRegistry::default();
        registry.validate_operations()?;

        let authorizer = Arc::new(StaticCapabilityAuthorizer::from_grants(
            &config.app.authorization.grants,
            &registry,
        )?);
        info!(
            "Loaded capability grants for {} user(s)",
            config.app.authorization.grants.len()
        );

        let group_service = match &config.app.provider.url {
            Some(url) => {
                let provider = Arc::new(KeycloakRestAdapter::from_config(
                    url.clone(),
                    &config.app.http,
                    config.app.provider.verify_ssl,
                )?);
                info!("Using Keycloak directory at {}", url);

                let service = GroupManagementService::new(provider, authorizer)
                    .with_member_count_concurrency(config.app.aggregation.member_count_concurrency);
                Some(Arc::new(service))
            }
            None => {
                warn!("KEYCLOAK_URL is not set; group endpoints will report the directory as unavailable");
                None
            }
        };

        Ok(Self {
            config: config.clone(),
            group_service,
        })
    }

    pub fn with_group_service(config: Config, service: GroupManagementService) -> Self {
        Self {
            config,
            group_service: Some(Arc::new(service)),
        }
    }

    pub fn groups(&self) -> Result<&GroupManagementService, AppError> {
        self.group_service.as_deref().ok_or_else(|| {
            AppError::Domain(DomainError::DependencyUnavailable {
                dependency: "directory provider".to_string(),
            })
        })
    }
}
