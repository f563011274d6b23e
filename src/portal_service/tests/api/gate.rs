use crate::helpers::TestApp;

#[tokio::test]
async fn gate_offers_federated_login_by_default() {
    let app = TestApp::new().await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(
        response
            .headers()
            .get_all("set-cookie")
            .iter()
            .any(|c| c.to_str().unwrap().starts_with("portal_gate="))
    );
    let body = response.text().await.unwrap();
    assert!(body.contains("/auth/federated"));
    assert!(!body.contains("captcha_token"));
}

#[tokio::test]
async fn gate_switches_to_registration_form() {
    let app = TestApp::new().await;

    let body = app.get("/?mode=registration").await.text().await.unwrap();

    assert!(body.contains("captcha_token"));
    assert!(body.contains("/register"));
}

#[tokio::test]
async fn signed_out_notice_is_shown() {
    let app = TestApp::new().await;

    let body = app.get("/?notice=signed_out").await.text().await.unwrap();

    assert!(body.contains("Você saiu da sua conta."));
}

#[tokio::test]
async fn static_assets_are_served() {
    let app = TestApp::new().await;

    let response = app.get("/assets/portal.js").await;

    assert_eq!(response.status().as_u16(), 200);
}
