use super::provider_group::ProviderGroup;
use crate::domain::errors::{codes, DomainError, DomainResult, FieldError};
use crate::domain::translation::from_provider_attributes;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Client-facing group, validated and ready for translation.
///
/// `short_name` doubles as the directory group name; `long_name` is folded
/// into the attributes under [`LONG_NAME_ATTRIBUTE`] before it reaches the
/// provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub short_name: String,
    pub long_name: String,
    pub attributes: BTreeMap<String, String>,
}

/// Reserved attribute key holding the group's long name
pub const LONG_NAME_ATTRIBUTE: &str = "longName";

impl Group {
    pub fn new(short_name: impl Into<String>, long_name: impl Into<String>) -> Self {
        Self {
            id: None,
            short_name: short_name.into(),
            long_name: long_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Create and update request body as sent by clients.
///
/// Absent and `null` fields both bind as `None` so that [`GroupRequest::into_group`]
/// can report every one of them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default, alias = "attr")]
    pub attributes: Option<BTreeMap<String, String>>,
}

impl GroupRequest {
    /// Checks the required fields, collecting one error per failing field:
    /// `missing` when absent or null, `empty` when blank.
    pub fn into_group(self) -> DomainResult<Group> {
        let checks = [
            ("shortName", self.short_name.as_deref().map(|v| v.trim().is_empty())),
            ("longName", self.long_name.as_deref().map(|v| v.trim().is_empty())),
            ("attributes", self.attributes.as_ref().map(BTreeMap::is_empty)),
        ];

        let errors: Vec<FieldError> = checks
            .into_iter()
            .filter_map(|(field, empty)| match empty {
                None => Some(
                    FieldError::new(codes::MISSING)
                        .with_field(field)
                        .with_detail("required"),
                ),
                Some(true) => Some(
                    FieldError::new(codes::EMPTY)
                        .with_field(field)
                        .with_detail("non-empty"),
                ),
                Some(false) => None,
            })
            .collect();

        if !errors.is_empty() {
            return Err(DomainError::ValidationFailed { errors });
        }

        Ok(Group {
            id: self.id,
            short_name: self.short_name.unwrap_or_default(),
            long_name: self.long_name.unwrap_or_default(),
            attributes: self.attributes.unwrap_or_default(),
        })
    }
}

/// Projection of a provider group for bulk listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupListEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    pub member_count: usize,
}

impl GroupListEntry {
    /// The list view exposes the provider path as the short name and the
    /// provider name as the long name.
    pub fn from_provider(group: &ProviderGroup, member_count: usize) -> Self {
        Self {
            short_name: group.path.clone(),
            long_name: group.name.clone(),
            member_count,
        }
    }
}

/// Result of listing the realm's groups, in directory order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupList {
    pub groups: Vec<GroupListEntry>,
}

/// Identifier returned by a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedGroup {
    pub id: String,
}

/// Projection of a single provider group with its member count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sub_groups: Vec<ProviderGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<HashMap<String, bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_roles: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_roles: Option<Vec<String>>,
    pub member_count: usize,
}

impl GroupDetail {
    pub fn from_provider(group: ProviderGroup, member_count: usize) -> Self {
        Self {
            id: group.id,
            name: group.name,
            path: group.path,
            sub_groups: group.sub_groups,
            attributes: from_provider_attributes(group.attributes),
            access: group.access,
            client_roles: group.client_roles,
            realm_roles: group.realm_roles,
            member_count,
        }
    }
}
