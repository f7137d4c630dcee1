#![allow(clippy::unwrap_used)]
// Integration tests for `Controller` against a wiremock backend.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drdash_api::DashboardClient;
use drdash_core::{
    Controller, CoreError, DashboardState, HealthClass, PollMode, RefreshPolicy, RoutingTarget,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn controller_for(server: &MockServer) -> Controller {
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DashboardClient::with_client(reqwest::Client::new(), base_url);
    Controller::new(
        client,
        PollMode::Live,
        RefreshPolicy::uniform(Duration::from_secs(600)),
    )
}

fn healthy_node(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "load_balancer_ip": "10.0.0.10",
        "load_balancer_alive": true,
        "load_balancer_port_1521": true,
        "load_balancer_db_connect": true,
        "connections": 42,
        "production_ip": "10.0.1.11",
        "production_alive": true,
        "production_port_1521": true,
        "production_db_connect": true,
        "production_status": "READ WRITE",
        "production_role": "PRIMARY",
        "production_dgdelay": -1,
        "disaster_ip": "10.0.2.11",
        "disaster_alive": true,
        "disaster_port_1521": true,
        "disaster_db_connect": true,
        "disaster_status": "READ ONLY WITH APPLY",
        "disaster_role": "PHYSICAL STANDBY",
        "disaster_dgdelay": 3
    })
}

fn envelope(nodes: &[serde_json::Value]) -> serde_json::Value {
    json!({ "code": 200, "data": nodes, "message": "" })
}

// ── Success path ────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_publishes_aggregated_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(&[healthy_node("CRM"), healthy_node("Billing")])),
        )
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    assert_eq!(controller.current_state(), DashboardState::Loading);

    controller.refresh().await;

    let DashboardState::Ready(view) = controller.current_state() else {
        panic!("expected Ready state");
    };
    assert_eq!(view.nodes.len(), 2);

    let crm = &view.nodes[0];
    assert_eq!(crm.name, "CRM");
    assert_eq!(crm.production.status.class, HealthClass::Online);
    assert_eq!(crm.production.status.label, "READ WRITE");
    assert_eq!(crm.routing, RoutingTarget::Production);
    assert!(crm.replicating);
    assert_eq!(crm.connections, Some(42));
    assert_eq!(crm.delay_seconds, Some(3));
}

#[tokio::test]
async fn refresh_is_idempotent_per_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&[healthy_node("CRM")])))
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.refresh().await;
    let DashboardState::Ready(first) = controller.current_state() else {
        panic!("expected Ready state");
    };
    controller.refresh().await;
    let DashboardState::Ready(second) = controller.current_state() else {
        panic!("expected Ready state");
    };

    assert_eq!(first.nodes, second.nodes);
}

// ── Failure taxonomy ────────────────────────────────────────────────

#[tokio::test]
async fn application_failure_publishes_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 503,
            "message": "collectors unavailable"
        })))
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.refresh().await;

    assert_eq!(
        controller.current_state(),
        DashboardState::Failed(CoreError::Backend {
            code: 503,
            message: "collectors unavailable".into()
        })
    );
}

#[tokio::test]
async fn decode_failure_publishes_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.refresh().await;

    assert!(matches!(
        controller.current_state(),
        DashboardState::Failed(CoreError::BadResponse { .. })
    ));
}

#[tokio::test]
async fn transport_failure_publishes_failed() {
    let client = DashboardClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1").unwrap(),
    );
    let controller = Controller::new(
        client,
        PollMode::Live,
        RefreshPolicy::uniform(Duration::from_secs(600)),
    );

    controller.refresh().await;

    assert!(matches!(
        controller.current_state(),
        DashboardState::Failed(CoreError::Unreachable { .. })
    ));
}

#[tokio::test]
async fn failure_clears_previous_view() {
    let server = MockServer::start().await;

    // First cycle succeeds...
    let ok = Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&[healthy_node("CRM")])))
        .expect(1)
        .mount_as_scoped(&server)
        .await;

    let controller = controller_for(&server);
    controller.refresh().await;
    assert!(matches!(
        controller.current_state(),
        DashboardState::Ready(_)
    ));
    drop(ok);

    // ...then the backend starts failing. No stale cards may survive.
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 500,
            "message": "boom"
        })))
        .mount(&server)
        .await;

    controller.refresh().await;
    assert!(matches!(
        controller.current_state(),
        DashboardState::Failed(CoreError::Backend { code: 500, .. })
    ));
}

// ── Single flight ───────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_refresh_triggers_coalesce() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(&[healthy_node("CRM")]))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);

    // A scheduled tick racing a visibility-triggered refresh: the
    // second trigger finds the gate held and returns without a request.
    tokio::join!(controller.refresh(), controller.refresh());

    assert!(matches!(
        controller.current_state(),
        DashboardState::Ready(_)
    ));
    server.verify().await;
}

// ── Mock mode ───────────────────────────────────────────────────────

#[tokio::test]
async fn mock_mode_carries_titles_into_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mock-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [healthy_node("CRM")],
            "titles": {
                "main_title": "Oracle DR Monitoring (Mock)",
                "prod_data_center": "Production Data Center",
                "dr_data_center": "Disaster Recovery Data Center"
            }
        })))
        .mount(&server)
        .await;

    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DashboardClient::with_client(reqwest::Client::new(), base_url);
    let controller = Controller::new(
        client,
        PollMode::Mock { lang: "en".into() },
        RefreshPolicy::uniform(Duration::from_secs(600)),
    );

    controller.refresh().await;

    let DashboardState::Ready(view) = controller.current_state() else {
        panic!("expected Ready state");
    };
    let titles = view.titles.clone().unwrap();
    assert_eq!(titles.main_title, "Oracle DR Monitoring (Mock)");
}
