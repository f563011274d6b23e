use std::time::Duration;

use crate::helpers::{TestApp, location, read_stream_until};

#[tokio::test]
async fn dashboard_without_session_redirects_to_gate() {
    let app = TestApp::new().await;

    let response = app.get("/dashboard").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn dashboard_shows_signed_in_student() {
    let app = TestApp::new().await;
    let session = app.sign_in();

    let response = app.get("/dashboard").await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains(session.email().expose()));
    assert!(body.contains("/logout"));
}

#[tokio::test]
async fn sign_out_returns_to_gate() {
    let app = TestApp::new().await;
    let session = app.sign_in();

    let response = app.post_logout().await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/?notice=signed_out");
    assert!(!app.provider.has_session(session.token()));

    let dashboard = app.get("/dashboard").await;
    assert_eq!(dashboard.status().as_u16(), 303);
}

#[tokio::test]
async fn failed_sign_out_keeps_dashboard() {
    let app = TestApp::new().await;
    let session = app.sign_in();
    app.provider.fail_sign_out(true);

    let response = app.post_logout().await;

    assert_eq!(response.status().as_u16(), 502);
    let body = response.text().await.unwrap();
    assert!(body.contains("Erro ao sair da conta."));
    assert!(app.provider.has_session(session.token()));

    let dashboard = app.get("/dashboard").await;
    assert_eq!(dashboard.status().as_u16(), 200);
}

#[tokio::test]
async fn session_expiry_is_pushed_to_open_dashboard() {
    let app = TestApp::new().await;
    let session = app.sign_in();

    let events = app.get("/dashboard/events").await;
    assert_eq!(events.status().as_u16(), 200);
    assert_eq!(app.provider.observer_count(session.token()), 1);

    app.provider.expire(session.token());

    let received = read_stream_until(events, "event: redirect", Duration::from_secs(5)).await;
    assert!(received.contains("event: redirect"));
    assert!(received.contains("/?notice=session_ended"));
}

#[tokio::test]
async fn events_without_session_redirect_immediately() {
    let app = TestApp::new().await;

    let events = app.get("/dashboard/events").await;

    let received = read_stream_until(events, "event: redirect", Duration::from_secs(5)).await;
    assert!(received.contains("/?notice=session_ended"));
}
