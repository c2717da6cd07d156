use crate::{
    application::ports::auth::CallerContext,
    domain::{
        entities::{resolve_realm, BearerToken, Claims},
        errors::DomainResult,
    },
};

/// Shared request prefix: bearer token, claims (issuer, username), then realm.
///
/// The token is trusted to have been verified upstream; only its claims are read.
pub fn authenticate(authorization_header: Option<&str>) -> DomainResult<CallerContext> {
    let token = BearerToken::from_header(authorization_header)?;
    let claims = Claims::from_token(&token)?;
    let realm = resolve_realm(&claims.issuer)?;

    Ok(CallerContext::new(token, claims.preferred_username, realm))
}
