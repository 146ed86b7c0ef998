use serde_json::json;
use superagent_core::api::{AuthPolicy, ResourceClient};
use superagent_core::auth::LoginRequest;
use superagent_core::config::EndpointConfig;
use superagent_core::job::{CreateJobRequest, JobId};
use superagent_core::system::KillAppRequest;
use superagent_core::watchdog::WatchdogSwitch;
use superagent_core::{BearerToken, DashboardApi, SuperAgentError};
use superagent_interaction::DashboardClient;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DashboardClient {
    DashboardClient::new(&EndpointConfig {
        base_url: server.uri(),
        timeout_secs: Some(5),
    })
    .unwrap()
}

fn token() -> BearerToken {
    BearerToken::new("tok-123")
}

#[tokio::test]
async fn test_login_returns_token_without_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "admin", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-123"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client
        .login(&LoginRequest {
            username: "admin".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();

    assert_eq!(reply.access_token, token());
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_failure_keeps_server_msg() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "Credenziali errate"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&LoginRequest {
            username: "admin".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err, SuperAgentError::status(401, Some("Credenziali errate".into())));
}

#[tokio::test]
async fn test_list_jobs_sends_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/distributed_jobs"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "agent_id": "render", "status": "running", "progress": 40},
            {"id": 2, "agent_id": "scan", "status": "done", "progress": 100.0}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = client_for(&server).list_jobs(&token()).await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].id, JobId::new("a1"));
    assert_eq!(jobs[1].id, JobId::new("2"));
    assert_eq!(jobs[1].progress, 100.0);
}

#[tokio::test]
async fn test_created_job_detail_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/distributed_jobs"))
        .and(body_json(json!({"agent_id": "render", "config": {"frames": 3}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"job_id": 7})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/distributed_jobs/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "agent_id": "render", "status": "queued", "progress": 0, "log": ["queued"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .create_job(
            &token(),
            &CreateJobRequest {
                agent_id: "render".into(),
                config: json!({"frames": 3}),
            },
        )
        .await
        .unwrap();
    let detail = client.get_job(&token(), &created.job_id).await.unwrap();

    assert_eq!(created.job_id, JobId::new("7"));
    assert_eq!(detail.log, vec!["queued".to_string()]);
}

#[tokio::test]
async fn test_job_id_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/distributed_jobs/batch%2F1%20a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "batch/1 a", "agent_id": "render", "status": "done", "progress": 100
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail = client_for(&server)
        .get_job(&token(), &JobId::new("batch/1 a"))
        .await
        .unwrap();

    assert_eq!(detail.id, JobId::new("batch/1 a"));
}

#[tokio::test]
async fn test_action_ignores_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/kill_app"))
        .and(body_json(json!({"pid": 42})))
        .respond_with(ResponseTemplate::new(200).set_body_string("killed"))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .kill_app(&token(), &KillAppRequest { pid: 42 })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_watchdog_switch_posts_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/watchdog/deactivate"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Watchdog disattivato"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .switch_watchdog(&token(), WatchdogSwitch::toggling(true))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_watchdog_limit_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/watchdog/set_limit"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Limite non valido"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .set_watchdog_limit(
            &token(),
            &superagent_core::watchdog::SetLimitRequest { limit: -1.0 },
        )
        .await
        .unwrap_err();

    assert!(err.is_status());
    assert_eq!(err.server_message(), Some("Limite non valido"));
}

#[tokio::test]
async fn test_health_probe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "message": "Super Agent API attiva"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let health = client.health().await.unwrap();

    assert_eq!(client.auth_policy(), AuthPolicy::Bearer);
    assert_eq!(health.status, "ok");
    assert_eq!(health.message.as_deref(), Some("Super Agent API attiva"));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = DashboardClient::new(&EndpointConfig {
        base_url: "http://127.0.0.1:1".into(),
        timeout_secs: Some(2),
    })
    .unwrap();

    let err = client.list_jobs(&token()).await.unwrap_err();
    assert!(err.is_transport());
}
