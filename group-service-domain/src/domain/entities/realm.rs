use crate::domain::errors::{DomainError, DomainResult};

/// Path segment that precedes the realm name in an issuer URL
pub const REALM_PATH_MARKER: &str = "/realms/";

/// Derives the realm from an issuer such as `https://host/realms/acme`.
///
/// The realm is the single segment following the last `/realms/` marker, so
/// for well-formed issuers this agrees with taking the last path segment.
/// A trailing slash is tolerated; anything else after the realm is rejected.
pub fn resolve_realm(issuer: &str) -> DomainResult<String> {
    let not_found = || DomainError::RealmNotFound {
        issuer: issuer.to_string(),
    };

    let (_, tail) = issuer.rsplit_once(REALM_PATH_MARKER).ok_or_else(not_found)?;
    let realm = tail.trim_end_matches('/');

    if realm.is_empty() || realm.contains('/') {
        return Err(not_found());
    }

    Ok(realm.to_string())
}
