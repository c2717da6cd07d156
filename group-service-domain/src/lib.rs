/*!
# Group Service Domain

Domain layer for realm group management backed by a Keycloak directory,
organised along hexagonal architecture lines.

This crate provides:
- Client and directory group models, and the attribute translation between them
- Claim extraction from bearer tokens and realm resolution from the issuer
- Capability registry and the fail-closed authorization check
- `GroupManagementService` implementing create, get, update and list
- Infrastructure adapters for the Keycloak admin REST API and a
  configuration-backed authorizer

## Architecture

```text
┌─────────────────────────────────────────────────────────────┐
│                    Primary Adapters                         │
│                 HTTP Server (Axum Handlers)                 │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                Application Layer                            │
│  • GroupManagementService   • MemberCountAggregator         │
│  • authenticate()           • AuthorizationHelper           │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                 Ports                                       │
│  • DirectoryProvider        • CapabilityAuthorizer          │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│              Infrastructure Layer (Adapters)                │
│  • KeycloakRestAdapter      • StaticCapabilityAuthorizer    │
└─────────────────────────────────────────────────────────────┘
```

## Usage

```rust,ignore
use group_service_domain::{
    GroupManagementService, KeycloakRestAdapter, StaticCapabilityAuthorizer,
};

let service = GroupManagementService::new(
    Arc::new(KeycloakRestAdapter::new("https://id.example.com")),
    Arc::new(StaticCapabilityAuthorizer::default()),
);

let groups = service.list_groups(Some("Bearer eyJ...")).await?;
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::ports::*;
pub use application::services::*;
pub use domain::entities::*;
pub use domain::errors::*;
pub use infrastructure::adapters::*;
