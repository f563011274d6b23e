use portal_core::Email;
use reqwest::Url;

use crate::helpers::{PROVIDER_AUTHORIZE_URL, TestApp, institutional_email, location};

async fn begin_and_read_state(app: &TestApp) -> String {
    let response = app.post_federated().await;
    assert_eq!(response.status().as_u16(), 303);

    let target = Url::parse(location(&response)).expect("provider url");
    assert!(target.as_str().starts_with(PROVIDER_AUTHORIZE_URL));
    target
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .expect("state parameter")
}

#[tokio::test]
async fn federated_round_trip_opens_dashboard() {
    let app = TestApp::new().await;
    app.provider.add_account("code-1", institutional_email());

    let state = begin_and_read_state(&app).await;
    let callback = app
        .get(&format!("/auth/callback?code=code-1&state={state}"))
        .await;

    assert_eq!(callback.status().as_u16(), 303);
    assert_eq!(location(&callback), "/dashboard?notice=signed_in");

    let dashboard = app.get("/dashboard?notice=signed_in").await;
    assert_eq!(dashboard.status().as_u16(), 200);
    let body = dashboard.text().await.unwrap();
    assert!(body.contains(institutional_email().expose()));
    assert!(body.contains("Login realizado com sucesso!"));
}

#[tokio::test]
async fn non_institutional_account_is_denied() {
    let app = TestApp::new().await;
    app.provider
        .add_account("code-2", Email::parse("maria@gmail.com").unwrap());

    let state = begin_and_read_state(&app).await;
    let callback = app
        .get(&format!("/auth/callback?code=code-2&state={state}"))
        .await;

    assert_eq!(callback.status().as_u16(), 403);
    let body = callback.text().await.unwrap();
    assert!(body.contains("Apenas e-mails institucionais"));

    let dashboard = app.get("/dashboard").await;
    assert_eq!(dashboard.status().as_u16(), 303);
}

#[tokio::test]
async fn callback_with_foreign_state_is_refused() {
    let app = TestApp::new().await;
    app.provider.add_account("code-3", institutional_email());

    begin_and_read_state(&app).await;
    let callback = app
        .get("/auth/callback?code=code-3&state=forged")
        .await;

    assert_eq!(callback.status().as_u16(), 400);
    let dashboard = app.get("/dashboard").await;
    assert_eq!(dashboard.status().as_u16(), 303);
}
