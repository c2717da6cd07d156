use crate::domain::errors::{AuthError, ConfigError};
use serde::Serialize;
use std::fmt;

/// Capability identifier understood by the authorization collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Capability(&'static str);

impl Capability {
    pub const GROUP_CREATE: Capability = Capability("GroupCreate");
    pub const GROUP_UPDATE: Capability = Capability("GroupUpdate");
    pub const DEVELOPER: Capability = Capability("developer");
    pub const ADMIN: Capability = Capability("admin");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The four group use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupOperation {
    Create,
    Get,
    Update,
    List,
}

impl GroupOperation {
    pub const ALL: [GroupOperation; 4] = [
        GroupOperation::Create,
        GroupOperation::Get,
        GroupOperation::Update,
        GroupOperation::List,
    ];

    /// Capabilities of which the caller must hold at least one
    pub fn required_capabilities(&self) -> &'static [Capability] {
        match self {
            GroupOperation::Create => &[Capability::GROUP_CREATE],
            GroupOperation::Update => &[Capability::GROUP_UPDATE],
            GroupOperation::Get | GroupOperation::List => {
                &[Capability::DEVELOPER, Capability::ADMIN]
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GroupOperation::Create => "group_create",
            GroupOperation::Get => "group_get",
            GroupOperation::Update => "group_update",
            GroupOperation::List => "group_list",
        }
    }
}

impl fmt::Display for GroupOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed set of capabilities the service knows about
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    known: Vec<Capability>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new(vec![
            Capability::GROUP_CREATE,
            Capability::GROUP_UPDATE,
            Capability::DEVELOPER,
            Capability::ADMIN,
        ])
    }
}

impl CapabilityRegistry {
    pub fn new(known: Vec<Capability>) -> Self {
        Self { known }
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.known.contains(&capability)
    }

    /// Resolves a free-form name (e.g. from configuration) to a known capability
    pub fn lookup(&self, name: &str) -> Result<Capability, AuthError> {
        self.known
            .iter()
            .copied()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| AuthError::UnknownCapability {
                capability: name.to_string(),
            })
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.known
    }

    /// Startup check: every operation must only reference registered capabilities
    pub fn validate_operations(&self) -> Result<(), ConfigError> {
        for operation in GroupOperation::ALL {
            for capability in operation.required_capabilities() {
                if !self.contains(*capability) {
                    return Err(ConfigError::UnknownCapability {
                        operation: operation.name().to_string(),
                        capability: capability.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
