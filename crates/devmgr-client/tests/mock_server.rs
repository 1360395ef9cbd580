//! Mock server tests for the devmgr client.
//!
//! These tests use wiremock to simulate the web-services API and test the
//! client's behavior without requiring network access or a real array.

use devmgr_client::error::AuthError;
use devmgr_client::{ApiSession, Credentials, Error, ServerUrl, Volume};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a server URL from a mock server.
fn mock_server_url(server: &MockServer) -> ServerUrl {
    ServerUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn credentials() -> Credentials {
    Credentials::new("rw", "rw")
}

async fn mount_login(server: &MockServer, cookie: &str) {
    Mock::given(method("POST"))
        .and(path("/devmgr/utils/login"))
        .and(body_json(json!({
            "userId": "rw",
            "password": "rw"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("JSESSIONID={}; Path=/; HttpOnly", cookie)),
        )
        .mount(server)
        .await;
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_session_login_and_cookie_reuse() {
    let server = MockServer::start().await;

    mount_login(&server, "abc123").await;

    // The listing only answers when the session cookie from login is sent.
    Mock::given(method("GET"))
        .and(path("/devmgr/v2/storage-systems"))
        .and(header("cookie", "JSESSIONID=abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "1", "name": "array-1"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ApiSession::session_auth(mock_server_url(&server));
    session.login(&credentials()).await.unwrap();
    assert!(session.is_logged_in());

    let systems = session.list_storage_systems().await.unwrap();
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].id, "1");

    // Credentials were sent to the login endpoint only; the follow-up GET
    // carried the cookie and no basic-auth header.
    let requests = server.received_requests().await.unwrap();
    let get = requests
        .iter()
        .find(|r| r.url.path() == "/devmgr/v2/storage-systems")
        .unwrap();
    assert!(!get.headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_session_request_before_login_fails_without_io() {
    let server = MockServer::start().await;

    let session = ApiSession::session_auth(mock_server_url(&server));
    let err = session.list_storage_systems().await.unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::NotLoggedIn)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devmgr/utils/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"errorMessage": "bad credentials"})),
        )
        .mount(&server)
        .await;

    let mut session = ApiSession::session_auth(mock_server_url(&server));
    let err = session.login(&Credentials::new("rw", "wrong")).await.unwrap_err();

    match err {
        Error::Auth(AuthError::LoginFailed { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("bad credentials"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_login_without_session_cookie_fails() {
    let server = MockServer::start().await;

    // A 200 that never sets JSESSIONID cannot establish a session.
    Mock::given(method("POST"))
        .and(path("/devmgr/utils/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut session = ApiSession::session_auth(mock_server_url(&server));
    let err = session.login(&credentials()).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Auth(AuthError::LoginFailed { status: 200, .. })
    ));
}

#[tokio::test]
async fn test_login_on_basic_session_is_rejected() {
    let server = MockServer::start().await;

    let mut session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let err = session.login(&credentials()).await.unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::NotSessionMode)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_basic_auth_never_persists_a_token() {
    let server = MockServer::start().await;

    // Each basic-auth call may come back with a different server-issued
    // session id; the client must ignore both.
    Mock::given(method("GET"))
        .and(path("/devmgr/v2/storage-systems"))
        .and(header("authorization", "Basic cnc6cnc="))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "JSESSIONID=first; Path=/")
                .set_body_json(json!([])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/devmgr/v2/storage-systems"))
        .and(header("authorization", "Basic cnc6cnc="))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "JSESSIONID=second; Path=/")
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    session.list_storage_systems().await.unwrap();
    session.list_storage_systems().await.unwrap();

    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_denied_request_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devmgr/v2/storage-systems"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let err = session.list_storage_systems().await.unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::Denied { status: 401 })));
}

// ============================================================================
// Volume Creation Tests
// ============================================================================

async fn mount_pools(server: &MockServer, pools: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/devmgr/v2/storage-systems/1/storage-pools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pools))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_volume_success() {
    let server = MockServer::start().await;

    mount_pools(
        &server,
        json!([{"id": "pool-a", "name": "fast", "raidLevel": "raid5"}]),
    )
    .await;

    let body = json!({
        "id": "v-9",
        "name": "vol1",
        "poolId": "pool-a",
        "capacity": "1"
    });

    // body_json only matches the exact serialized fields, so this also
    // pins the request wire format.
    Mock::given(method("POST"))
        .and(path("/devmgr/v2/storage-systems/1/volumes"))
        .and(body_json(json!({
            "name": "vol1",
            "size": "1",
            "poolId": "pool-a"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let volume = session.create_volume("1", "vol1", "1", Some("fast")).await.unwrap();

    let expected: Volume = serde_json::from_value(body).unwrap();
    assert_eq!(volume, expected);
}

#[tokio::test]
async fn test_create_volume_unnamed_pool_picks_first() {
    let server = MockServer::start().await;

    // Server order is authoritative; "beta" comes first and wins.
    mount_pools(
        &server,
        json!([
            {"id": "pool-b", "name": "beta"},
            {"id": "pool-a", "name": "alpha"}
        ]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/devmgr/v2/storage-systems/1/volumes"))
        .and(body_json(json!({
            "name": "vol1",
            "size": "1",
            "poolId": "pool-b"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "vol1", "poolId": "pool-b"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let volume = session.create_volume("1", "vol1", "1", None).await.unwrap();
    assert_eq!(volume.pool_id.as_deref(), Some("pool-b"));
}

#[tokio::test]
async fn test_create_volume_pool_not_found_skips_post() {
    let server = MockServer::start().await;

    mount_pools(&server, json!([{"id": "pool-a", "name": "alpha"}])).await;

    // The creation endpoint must never be reached on this path.
    Mock::given(method("POST"))
        .and(path("/devmgr/v2/storage-systems/1/volumes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let err = session
        .create_volume("1", "vol1", "1", Some("missing"))
        .await
        .unwrap_err();

    match err {
        Error::PoolNotFound { system_id, name } => {
            assert_eq!(system_id, "1");
            assert_eq!(name.as_deref(), Some("missing"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_volume_empty_pool_list() {
    let server = MockServer::start().await;

    mount_pools(&server, json!([])).await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let err = session.create_volume("1", "vol1", "1", None).await.unwrap_err();

    assert!(matches!(err, Error::PoolNotFound { name: None, .. }));
}

#[tokio::test]
async fn test_create_volume_validation_failure() {
    let server = MockServer::start().await;

    mount_pools(&server, json!([{"id": "pool-a", "name": "alpha"}])).await;

    Mock::given(method("POST"))
        .and(path("/devmgr/v2/storage-systems/1/volumes"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"errorMessage": "duplicate name"})),
        )
        .mount(&server)
        .await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let err = session.create_volume("1", "vol1", "1", None).await.unwrap_err();

    match err {
        Error::Validation { message } => assert_eq!(message, "duplicate name"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_volume_unexpected_status() {
    let server = MockServer::start().await;

    mount_pools(&server, json!([{"id": "pool-a", "name": "alpha"}])).await;

    Mock::given(method("POST"))
        .and(path("/devmgr/v2/storage-systems/1/volumes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let err = session.create_volume("1", "vol1", "1", None).await.unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status, 500);
            assert_eq!(api.body, "internal error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_pool_listing_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devmgr/v2/storage-systems/1/storage-pools"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let err = session.find_pool_by_name("1", None).await.unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status, 500);
            assert_eq!(api.body, "internal error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_volume_rejects_empty_name() {
    let server = MockServer::start().await;

    let session = ApiSession::basic_auth(mock_server_url(&server), credentials());
    let err = session.create_volume("1", "", "1", None).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
