use crate::domain::errors::{DomainError, DomainResult};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Claim names read from the caller's access token
pub mod claim_names {
    pub const ISSUER: &str = "iss";
    pub const PREFERRED_USERNAME: &str = "preferred_username";
}

/// Raw bearer token taken from the `Authorization` header
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Parses `Bearer <token>`; the scheme is matched case-insensitively
    pub fn from_header(header: Option<&str>) -> DomainResult<Self> {
        let header = header.ok_or(DomainError::TokenMissing)?.trim();
        let (scheme, token) = header.split_once(' ').ok_or(DomainError::TokenMissing)?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(DomainError::TokenMissing);
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::TokenMissing);
        }

        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the token itself.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Claims consumed by the request pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub issuer: String,
    pub preferred_username: String,
}

impl Claims {
    pub fn from_token(token: &BearerToken) -> DomainResult<Self> {
        let payload = decode_payload(token.as_str(), claim_names::ISSUER)?;
        Ok(Self {
            issuer: claim_from_payload(&payload, claim_names::ISSUER)?,
            preferred_username: claim_from_payload(&payload, claim_names::PREFERRED_USERNAME)?,
        })
    }
}

/// Reads a single string claim from a token without checking its signature.
/// Signature verification belongs to whoever issued and fronts the token.
pub fn extract_claim(token: &str, claim: &str) -> DomainResult<String> {
    let payload = decode_payload(token, claim)?;
    claim_from_payload(&payload, claim)
}

fn claims_only_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

fn decode_payload(token: &str, claim: &str) -> DomainResult<HashMap<String, Value>> {
    decode::<HashMap<String, Value>>(token, &DecodingKey::from_secret(&[]), &claims_only_validation())
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Token payload could not be decoded: {}", e);
            DomainError::ClaimMissing {
                claim: claim.to_string(),
            }
        })
}

fn claim_from_payload(payload: &HashMap<String, Value>, claim: &str) -> DomainResult<String> {
    payload
        .get(claim)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DomainError::ClaimMissing {
            claim: claim.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token(claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"any-secret"),
        )
        .unwrap()
    }

    #[test]
    fn reads_claims_without_verifying_signature() {
        let token = token(json!({
            "iss": "https://id.example.com/realms/acme",
            "preferred_username": "alice",
            "aud": "account",
            "exp": 1
        }));

        assert_eq!(extract_claim(&token, "preferred_username").unwrap(), "alice");
        let claims = Claims::from_token(&BearerToken::new(token)).unwrap();
        assert_eq!(claims.issuer, "https://id.example.com/realms/acme");
    }

    #[test]
    fn absent_claim_is_reported_by_name() {
        let token = token(json!({"iss": "https://id.example.com/realms/acme"}));

        match extract_claim(&token, "preferred_username") {
            Err(DomainError::ClaimMissing { claim }) => assert_eq!(claim, "preferred_username"),
            other => panic!("expected missing claim, got {other:?}"),
        }
    }

    #[test]
    fn malformed_token_is_a_missing_claim() {
        assert!(matches!(
            extract_claim("not-a-jwt", "iss"),
            Err(DomainError::ClaimMissing { .. })
        ));
    }

    #[test]
    fn non_string_claims_are_missing() {
        let token = token(json!({"preferred_username": 42}));
        assert!(extract_claim(&token, "preferred_username").is_err());
    }

    #[test]
    fn parses_bearer_header() {
        let token = BearerToken::from_header(Some("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token.as_str(), "abc.def.ghi");

        let token = BearerToken::from_header(Some("bearer   xyz")).unwrap();
        assert_eq!(token.as_str(), "xyz");
    }

    #[test]
    fn rejects_missing_or_foreign_authorization() {
        for header in [None, Some(""), Some("Bearer"), Some("Bearer   "), Some("Basic dXNlcg==")] {
            assert!(
                matches!(BearerToken::from_header(header), Err(DomainError::TokenMissing)),
                "header {header:?} should be rejected"
            );
        }
    }

    #[test]
    fn debug_output_hides_token() {
        let token = BearerToken::new("secret-token");
        assert!(!format!("{token:?}").contains("secret"));
    }
}
