use async_trait::async_trait;
use reqwest::{header::LOCATION, Response, StatusCode};
use tracing::{debug, instrument};

use crate::application::ports::{config::HttpConfig, directory::DirectoryProvider};
use crate::domain::{entities::*, errors::*};

/// Upper bound sent as `max` on member lookups. Keycloak pages members at
/// 100 by default, which would cap every count.
pub const MEMBER_LOOKUP_MAX: i32 = i32::MAX;

/// Keycloak admin REST adapter implementing the DirectoryProvider port.
///
/// Calls are made on behalf of the caller, with the caller's bearer token.
pub struct KeycloakRestAdapter {
    base_url: String,
    client: reqwest::Client,
}

impl KeycloakRestAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::new_with_client(base_url, reqwest::Client::new())
    }

    pub fn new_with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Build an adapter whose client honours the configured timeouts
    pub fn from_config(
        base_url: impl Into<String>,
        http: &HttpConfig,
        verify_ssl: bool,
    ) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(http.get_timeout())
            .connect_timeout(http.get_connect_timeout())
            .user_agent(http.user_agent.clone())
            .danger_accept_invalid_certs(!verify_ssl)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "HTTP".to_string(),
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self::new_with_client(base_url, client))
    }

    fn groups_url(&self, realm: &str) -> String {
        format!(
            "{}/admin/realms/{}/groups",
            self.base_url,
            urlencoding::encode(realm)
        )
    }

    fn group_url(&self, realm: &str, group_id: &str) -> String {
        format!("{}/{}", self.groups_url(realm), urlencoding::encode(group_id))
    }

    fn group_by_path_url(&self, realm: &str, path: &str) -> String {
        let encoded: Vec<String> = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();

        format!(
            "{}/admin/realms/{}/group-by-path/{}",
            self.base_url,
            urlencoding::encode(realm),
            encoded.join("/")
        )
    }

    /// Map non-success statuses onto provider errors
    async fn check(response: Response) -> ProviderResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        debug!(%status, "Keycloak returned an error response");

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::Unauthorized { message }
            }
            StatusCode::NOT_FOUND => ProviderError::NotFound { message },
            StatusCode::CONFLICT => ProviderError::Conflict { message },
            _ => ProviderError::Http {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn send(request: reqwest::RequestBuilder) -> ProviderResult<Response> {
        let response = request.send().await.map_err(|e| ProviderError::Transport {
            message: format!("HTTP request failed: {e}"),
        })?;

        Self::check(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ProviderResult<T> {
        response.json().await.map_err(|e| ProviderError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl DirectoryProvider for KeycloakRestAdapter {
    #[instrument(skip(self, token, group), fields(realm = %realm))]
    async fn create_group(
        &self,
        token: &BearerToken,
        realm: &str,
        group: &ProviderGroup,
    ) -> ProviderResult<String> {
        let response = Self::send(
            self.client
                .post(self.groups_url(realm))
                .bearer_auth(token.as_str())
                .json(group),
        )
        .await?;

        // The new id is the last segment of the Location header.
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|location| location.trim_end_matches('/').rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::Decode {
                message: "Failed to get group ID from response".to_string(),
            })
    }

    #[instrument(skip(self, token, group), fields(realm = %realm))]
    async fn update_group(
        &self,
        token: &BearerToken,
        realm: &str,
        group: &ProviderGroup,
    ) -> ProviderResult<()> {
        let group_id = group.id.as_deref().ok_or_else(|| ProviderError::Http {
            status: StatusCode::BAD_REQUEST.as_u16(),
            message: "Group ID is required for updates".to_string(),
        })?;

        Self::send(
            self.client
                .put(self.group_url(realm, group_id))
                .bearer_auth(token.as_str())
                .json(group),
        )
        .await?;

        Ok(())
    }

    #[instrument(skip(self, token), fields(realm = %realm))]
    async fn get_groups(
        &self,
        token: &BearerToken,
        realm: &str,
        search: &GroupSearch,
    ) -> ProviderResult<Vec<ProviderGroup>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(term) = &search.search {
            query.push(("search", term.clone()));
        }
        if let Some(exact) = search.exact {
            query.push(("exact", exact.to_string()));
        }

        let response = Self::send(
            self.client
                .get(self.groups_url(realm))
                .bearer_auth(token.as_str())
                .query(&query),
        )
        .await?;

        Self::decode(response).await
    }

    #[instrument(skip(self, token), fields(realm = %realm))]
    async fn get_group_by_path(
        &self,
        token: &BearerToken,
        realm: &str,
        path: &str,
    ) -> ProviderResult<ProviderGroup> {
        let response = Self::send(
            self.client
                .get(self.group_by_path_url(realm, path))
                .bearer_auth(token.as_str()),
        )
        .await?;

        Self::decode(response).await
    }

    #[instrument(skip(self, token), fields(realm = %realm))]
    async fn get_group_members(
        &self,
        token: &BearerToken,
        realm: &str,
        group_id: &str,
    ) -> ProviderResult<Vec<GroupMember>> {
        let response = Self::send(
            self.client
                .get(format!("{}/members", self.group_url(realm, group_id)))
                .bearer_auth(token.as_str())
                .query(&[
                    ("briefRepresentation", "true".to_string()),
                    ("max", MEMBER_LOOKUP_MAX.to_string()),
                ]),
        )
        .await?;

        Self::decode(response).await
    }
}
