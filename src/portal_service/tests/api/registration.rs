use std::time::Duration;

use portal_adapters::MockRegistrationEndpoint;

use crate::helpers::{INSTITUTIONAL_EMAIL, TestApp};

#[tokio::test]
async fn valid_registration_reaches_endpoint() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&[
            ("email", INSTITUTIONAL_EMAIL),
            ("cpf", "123.456.789-09"),
            ("captcha_token", "solved"),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Solicitação enviada!"));

    let submissions = app.endpoint.submissions().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].email, INSTITUTIONAL_EMAIL);
    assert_eq!(submissions[0].cpf, "123.456.789-09");
    assert_eq!(submissions[0].captcha_token, "solved");
}

#[tokio::test]
async fn outside_email_is_rejected_before_submission() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&[
            ("email", "maria@gmail.com"),
            ("cpf", "123.456.789-09"),
            ("captcha_token", "solved"),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 422);
    assert!(app.endpoint.submissions().await.is_empty());
}

#[tokio::test]
async fn unsolved_captcha_blocks_submission() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&[("email", INSTITUTIONAL_EMAIL), ("cpf", "123.456.789-09")])
        .await;

    assert_eq!(response.status().as_u16(), 422);
    assert!(app.endpoint.submissions().await.is_empty());
}

#[tokio::test]
async fn endpoint_failure_keeps_form_with_error() {
    let app = TestApp::with_endpoint(MockRegistrationEndpoint::new().rejecting(500)).await;

    let response = app
        .post_register(&[
            ("email", INSTITUTIONAL_EMAIL),
            ("cpf", "123.456.789-09"),
            ("captcha_token", "solved"),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 502);
    let body = response.text().await.unwrap();
    assert!(body.contains("123.456.789-09"));
}

#[tokio::test]
async fn second_submission_while_first_is_pending_is_refused() {
    let app = TestApp::with_endpoint(
        MockRegistrationEndpoint::new().with_delay(Duration::from_millis(300)),
    )
    .await;
    // Both submissions share the gate cookie issued here.
    app.get("/?mode=registration").await;

    let form = [
        ("email", INSTITUTIONAL_EMAIL),
        ("cpf", "123.456.789-09"),
        ("captcha_token", "solved"),
    ];
    let (first, second) = tokio::join!(app.post_register(&form), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        app.post_register(&form).await
    });

    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(second.status().as_u16(), 409);
    assert_eq!(app.endpoint.submissions().await.len(), 1);
}
