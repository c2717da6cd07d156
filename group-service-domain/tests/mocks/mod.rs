#![allow(dead_code)]

use async_trait::async_trait;
use group_service_domain::{
    application::ports::{
        auth::{AuthorizationRequest, CapabilityAuthorizer},
        directory::DirectoryProvider,
    },
    domain::{
        entities::{BearerToken, GroupMember, GroupSearch, ProviderGroup},
        errors::{AuthError, ProviderError, ProviderResult},
    },
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Builds an `Authorization` header value for a caller in `realm`
pub fn bearer(realm: &str, username: &str) -> String {
    let claims = json!({
        "iss": format!("https://id.example.com/realms/{realm}"),
        "preferred_username": username,
        "aud": "account",
    });
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("Failed to encode test token");
    format!("Bearer {token}")
}

pub fn provider_group(id: &str, name: &str) -> ProviderGroup {
    ProviderGroup {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        path: Some(format!("/{name}")),
        ..Default::default()
    }
}

pub fn members(count: usize) -> Vec<GroupMember> {
    (0..count)
        .map(|i| GroupMember {
            id: Some(format!("user-{i}")),
            username: Some(format!("user{i}")),
        })
        .collect()
}

/// Mock directory provider for testing
pub struct MockDirectoryProvider {
    pub groups: Arc<Mutex<Vec<ProviderGroup>>>,
    pub members: Arc<Mutex<HashMap<String, Vec<GroupMember>>>>,
    pub failing_member_lookups: Arc<Mutex<HashSet<String>>>,
    pub get_groups_error: Arc<Mutex<Option<ProviderError>>>,
    pub search_response: Arc<Mutex<Option<Vec<ProviderGroup>>>>,
    pub write_error: Arc<Mutex<Option<ProviderError>>>,
    pub created: Arc<Mutex<Vec<(String, ProviderGroup)>>>,
    pub updated: Arc<Mutex<Vec<(String, ProviderGroup)>>>,
    pub searches: Arc<Mutex<Vec<GroupSearch>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub group_counter: Arc<Mutex<u32>>,
}

impl MockDirectoryProvider {
    pub fn new() -> Self {
        Self {
            groups: Arc::new(Mutex::new(Vec::new())),
            members: Arc::new(Mutex::new(HashMap::new())),
            failing_member_lookups: Arc::new(Mutex::new(HashSet::new())),
            get_groups_error: Arc::new(Mutex::new(None)),
            search_response: Arc::new(Mutex::new(None)),
            write_error: Arc::new(Mutex::new(None)),
            created: Arc::new(Mutex::new(Vec::new())),
            updated: Arc::new(Mutex::new(Vec::new())),
            searches: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            group_counter: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_group(self, group: ProviderGroup, member_count: usize) -> Self {
        if let Some(id) = &group.id {
            self.members
                .lock()
                .unwrap()
                .insert(id.clone(), members(member_count));
        }
        self.groups.lock().unwrap().push(group);
        self
    }

    pub fn fail_member_lookup(&self, group_id: &str) {
        self.failing_member_lookups
            .lock()
            .unwrap()
            .insert(group_id.to_string());
    }

    pub fn fail_get_groups(&self, error: ProviderError) {
        *self.get_groups_error.lock().unwrap() = Some(error);
    }

    /// Answers every search with `groups` as given, nesting included
    pub fn respond_to_search(&self, groups: Vec<ProviderGroup>) {
        *self.search_response.lock().unwrap() = Some(groups);
    }

    pub fn fail_writes(&self, error: ProviderError) {
        *self.write_error.lock().unwrap() = Some(error);
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    fn check_write(&self) -> ProviderResult<()> {
        match self.write_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DirectoryProvider for MockDirectoryProvider {
    async fn create_group(
        &self,
        _token: &BearerToken,
        realm: &str,
        group: &ProviderGroup,
    ) -> ProviderResult<String> {
        self.record("create_group");
        self.check_write()?;

        let id = {
            let mut counter = self.group_counter.lock().unwrap();
            *counter += 1;
            format!("group-{}", counter)
        };

        let mut stored = group.clone();
        stored.id = Some(id.clone());
        stored.path = group.name.as_ref().map(|name| format!("/{name}"));
        self.groups.lock().unwrap().push(stored);
        self.created
            .lock()
            .unwrap()
            .push((realm.to_string(), group.clone()));

        Ok(id)
    }

    async fn update_group(
        &self,
        _token: &BearerToken,
        realm: &str,
        group: &ProviderGroup,
    ) -> ProviderResult<()> {
        self.record("update_group");
        self.check_write()?;

        self.updated
            .lock()
            .unwrap()
            .push((realm.to_string(), group.clone()));
        Ok(())
    }

    async fn get_groups(
        &self,
        _token: &BearerToken,
        _realm: &str,
        search: &GroupSearch,
    ) -> ProviderResult<Vec<ProviderGroup>> {
        self.record("get_groups");
        self.searches.lock().unwrap().push(search.clone());

        if let Some(error) = self.get_groups_error.lock().unwrap().clone() {
            return Err(error);
        }

        if let Some(groups) = self.search_response.lock().unwrap().clone() {
            return Ok(groups);
        }

        let groups = self.groups.lock().unwrap().clone();
        let filtered = match &search.search {
            None => groups,
            Some(term) => groups
                .into_iter()
                .filter(|g| {
                    let name = g.name.clone().unwrap_or_default();
                    if search.exact == Some(true) {
                        name == *term
                    } else {
                        name.to_lowercase().contains(&term.to_lowercase())
                    }
                })
                .collect(),
        };

        Ok(filtered)
    }

    async fn get_group_by_path(
        &self,
        _token: &BearerToken,
        _realm: &str,
        path: &str,
    ) -> ProviderResult<ProviderGroup> {
        self.record("get_group_by_path");

        self.groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.path.as_deref() == Some(path))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                message: format!("Could not find group by path {path}"),
            })
    }

    async fn get_group_members(
        &self,
        _token: &BearerToken,
        _realm: &str,
        group_id: &str,
    ) -> ProviderResult<Vec<GroupMember>> {
        self.record("get_group_members");

        if self.failing_member_lookups.lock().unwrap().contains(group_id) {
            return Err(ProviderError::Transport {
                message: "connection reset".to_string(),
            });
        }

        Ok(self
            .members
            .lock()
            .unwrap()
            .get(group_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock authorization collaborator with a switchable decision
pub struct MockCapabilityAuthorizer {
    pub allowed: Arc<Mutex<bool>>,
    pub should_fail: Arc<Mutex<bool>>,
    pub requests: Arc<Mutex<Vec<AuthorizationRequest>>>,
}

impl MockCapabilityAuthorizer {
    pub fn new() -> Self {
        Self {
            allowed: Arc::new(Mutex::new(true)),
            should_fail: Arc::new(Mutex::new(false)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_allowed(&self, allowed: bool) {
        *self.allowed.lock().unwrap() = allowed;
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn last_request(&self) -> Option<AuthorizationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CapabilityAuthorizer for MockCapabilityAuthorizer {
    async fn authorize(&self, request: &AuthorizationRequest) -> Result<bool, AuthError> {
        self.requests.lock().unwrap().push(request.clone());

        if *self.should_fail.lock().unwrap() {
            return Err(AuthError::BackendUnavailable {
                reason: "Mock failure enabled".to_string(),
            });
        }

        Ok(*self.allowed.lock().unwrap())
    }
}
