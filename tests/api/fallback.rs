use crate::helper::{envelope, spawn_app};

#[tokio::test]
async fn an_unknown_path_answers_with_a_404_envelope() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/api/nothing", app.addr))
        .send()
        .await
        .expect("Request should succeed");

    assert_eq!(404, response.status().as_u16());
    let resp = envelope(response).await;
    assert_eq!(resp["msg"], "No route for /api/nothing.");
    assert!(resp["body"].is_null());
}

#[tokio::test]
async fn an_unsupported_method_answers_with_a_405_envelope() {
    let app = spawn_app().await;
    let token = app.access_token(1, "ssar");

    let response = app
        .client
        .patch(format!("{}/api/board/1", app.addr))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Request should succeed");

    assert_eq!(405, response.status().as_u16());
    assert!(response.headers().get("Allow").is_some());
    let resp = envelope(response).await;
    assert_eq!(resp["msg"], "Method not allowed.");
    assert!(resp["body"].is_null());
}
