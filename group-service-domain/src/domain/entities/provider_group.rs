use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Group as stored by the directory provider (Keycloak `GroupRepresentation`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_groups: Vec<ProviderGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<HashMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<HashMap<String, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_roles: Option<HashMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_roles: Option<Vec<String>>,
}

impl ProviderGroup {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Depth-first search for the group named exactly `name`, subgroups included
    pub fn find_named<'a>(groups: &'a [ProviderGroup], name: &str) -> Option<&'a ProviderGroup> {
        groups.iter().find_map(|group| {
            if group.name.as_deref() == Some(name) {
                Some(group)
            } else {
                Self::find_named(&group.sub_groups, name)
            }
        })
    }
}

/// Member returned by a group membership lookup. Only the count is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Filter for querying provider groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSearch {
    pub search: Option<String>,
    pub exact: Option<bool>,
}

impl GroupSearch {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            search: Some(name.into()),
            exact: None,
        }
    }

    pub fn exact(name: impl Into<String>) -> Self {
        Self {
            search: Some(name.into()),
            exact: Some(true),
        }
    }
}
