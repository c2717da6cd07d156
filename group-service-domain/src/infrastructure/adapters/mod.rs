pub mod keycloak_rest;
pub mod static_capability_authorizer;

pub use keycloak_rest::*;
pub use static_capability_authorizer::*;
