use group_service_domain::{
    application::ports::directory::DirectoryProvider,
    domain::{
        entities::{BearerToken, GroupSearch, ProviderGroup},
        errors::ProviderError,
    },
    infrastructure::adapters::{KeycloakRestAdapter, MEMBER_LOOKUP_MAX},
};
use serde_json::json;
use std::collections::HashMap;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> BearerToken {
    BearerToken::new("caller-token")
}

#[tokio::test]
async fn test_create_group_returns_id_from_location() {
    let server = MockServer::start().await;

    let mut attributes = HashMap::new();
    attributes.insert("longName".to_string(), vec!["Quality".to_string()]);
    let group = ProviderGroup {
        name: Some("qa-team".to_string()),
        attributes: Some(attributes),
        ..Default::default()
    };

    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/groups"))
        .and(header("authorization", "Bearer caller-token"))
        .and(body_json(json!({
            "name": "qa-team",
            "attributes": {"longName": ["Quality"]}
        })))
        .respond_with(ResponseTemplate::new(201).insert_header(
            "Location",
            format!("{}/admin/realms/acme/groups/3f1c-22", server.uri()).as_str(),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = KeycloakRestAdapter::new(server.uri());
    let id = adapter.create_group(&token(), "acme", &group).await.unwrap();

    assert_eq!(id, "3f1c-22");
}

#[tokio::test]
async fn test_create_group_without_location_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/groups"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let adapter = KeycloakRestAdapter::new(server.uri());
    let result = adapter
        .create_group(&token(), "acme", &ProviderGroup::named("qa-team"))
        .await;

    assert!(matches!(result, Err(ProviderError::Decode { .. })));
}

#[tokio::test]
async fn test_get_groups_passes_search_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/groups"))
        .and(query_param("search", "qa-team"))
        .and(query_param("exact", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "g1", "name": "qa-team", "path": "/qa-team", "subGroups": []}
        ])))
        .mount(&server)
        .await;

    let adapter = KeycloakRestAdapter::new(server.uri());
    let groups = adapter
        .get_groups(&token(), "acme", &GroupSearch::exact("qa-team"))
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id.as_deref(), Some("g1"));
    assert_eq!(groups[0].path.as_deref(), Some("/qa-team"));
}

#[tokio::test]
async fn test_rejected_token_maps_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/groups"))
        .respond_with(ResponseTemplate::new(401).set_body_string("HTTP 401 Unauthorized"))
        .mount(&server)
        .await;

    let adapter = KeycloakRestAdapter::new(server.uri());
    let error = adapter
        .get_groups(&token(), "acme", &GroupSearch::all())
        .await
        .unwrap_err();

    assert!(error.is_unauthorized());
}

#[tokio::test]
async fn test_conflict_and_server_errors_are_distinguished() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/admin/realms/acme/groups/g1"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/acme/groups/g2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = KeycloakRestAdapter::new(server.uri());

    let mut group = ProviderGroup::named("qa-team");
    group.id = Some("g1".to_string());
    let conflict = adapter.update_group(&token(), "acme", &group).await;
    assert!(matches!(conflict, Err(ProviderError::Conflict { .. })));

    group.id = Some("g2".to_string());
    let failure = adapter.update_group(&token(), "acme", &group).await;
    assert!(matches!(failure, Err(ProviderError::Http { status: 500, .. })));
}

#[tokio::test]
async fn test_update_group_without_id_is_rejected_locally() {
    let server = MockServer::start().await;
    let adapter = KeycloakRestAdapter::new(server.uri());

    let result = adapter
        .update_group(&token(), "acme", &ProviderGroup::named("qa-team"))
        .await;

    assert!(result.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_group_by_path_and_members() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/group-by-path/qa-team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g1",
            "name": "qa-team",
            "path": "/qa-team",
            "attributes": {"longName": ["Quality"]},
            "realmRoles": ["viewer"]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/groups/g1/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "u1", "username": "alice"},
            {"id": "u2", "username": "bob"}
        ])))
        .mount(&server)
        .await;

    let adapter = KeycloakRestAdapter::new(server.uri());

    let group = adapter
        .get_group_by_path(&token(), "acme", "/qa-team")
        .await
        .unwrap();
    assert_eq!(group.id.as_deref(), Some("g1"));
    assert_eq!(group.realm_roles, Some(vec!["viewer".to_string()]));

    let members = adapter
        .get_group_members(&token(), "acme", "g1")
        .await
        .unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[1].username.as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_member_lookup_requests_brief_unpaged_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/groups/g1/members"))
        .and(query_param("briefRepresentation", "true"))
        .and(query_param("max", MEMBER_LOOKUP_MAX.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "u1", "username": "alice"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = KeycloakRestAdapter::new(server.uri());
    let members = adapter
        .get_group_members(&token(), "acme", "g1")
        .await
        .unwrap();

    assert_eq!(members.len(), 1);
}

#[tokio::test]
async fn test_unexpected_payload_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/groups/g1/members"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let adapter = KeycloakRestAdapter::new(server.uri());
    let result = adapter.get_group_members(&token(), "acme", "g1").await;

    assert!(matches!(result, Err(ProviderError::Decode { .. })));
}
