use serde_json::json;

use crate::helper::{envelope, spawn_app};

#[tokio::test]
async fn join_returns_the_new_user_with_an_empty_profile() {
    let app = spawn_app().await;
    let body = json!({"username": "haha", "password": "1234", "email": "haha@nate.com"});

    let response = app.post_join(&body).await;

    assert_eq!(200, response.status().as_u16());
    let resp = envelope(response).await;
    assert_eq!(resp["status"], 200);
    assert_eq!(resp["msg"], "성공");
    // Three dummy users are seeded before every test.
    assert_eq!(resp["body"]["id"], 4);
    assert_eq!(resp["body"]["username"], "haha");
    assert_eq!(resp["body"]["email"], "haha@nate.com");
    assert!(resp["body"]["profile"].is_null());
}

#[tokio::test]
async fn join_stores_a_hashed_password() {
    let app = spawn_app().await;
    let body = json!({"username": "haha", "password": "1234", "email": "haha@nate.com"});

    app.post_join(&body).await;

    let (password,): (String,) =
        sqlx::query_as("select password from user_tb where username = 'haha'")
            .fetch_one(&app.db_pool)
            .await
            .expect("The new user should be stored.");
    assert_ne!(password, "1234");
    assert!(password.starts_with("$argon2"));
}

#[tokio::test]
async fn join_returns_a_400_when_the_username_is_taken() {
    let app = spawn_app().await;
    let body = json!({"username": "ssar", "password": "1234", "email": "other@nate.com"});

    let response = app.post_join(&body).await;

    assert_eq!(400, response.status().as_u16());
    let resp = envelope(response).await;
    assert!(resp["body"].is_null());
}

#[tokio::test]
async fn join_returns_a_400_when_fields_are_present_but_invalid() {
    let app = spawn_app().await;
    let test_cases = [
        (
            json!({"username": "h", "password": "1234", "email": "haha@nate.com"}),
            "too short username",
        ),
        (
            json!({"username": "ha ha", "password": "1234", "email": "haha@nate.com"}),
            "username with a space",
        ),
        (
            json!({"username": "haha", "password": "123", "email": "haha@nate.com"}),
            "too short password",
        ),
        (
            json!({"username": "haha", "password": "1234", "email": "definitely-not-an-email"}),
            "invalid email",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_join(&body).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload had a {}.",
            description
        );
    }
}

#[tokio::test]
async fn join_returns_a_400_envelope_when_data_is_missing() {
    let app = spawn_app().await;
    let test_cases = [
        (json!({"username": "haha", "password": "1234"}), "missing the email"),
        (json!({"username": "haha", "email": "haha@nate.com"}), "missing the password"),
        (json!({}), "missing everything"),
    ];

    for (body, description) in test_cases {
        let response = app.post_join(&body).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 when the payload was {}",
            description
        );
        let resp = envelope(response).await;
        assert!(!resp["msg"].as_str().unwrap_or_default().is_empty());
        assert!(resp["body"].is_null());
    }
}

#[tokio::test]
async fn login_sets_a_bearer_authorization_header() {
    let app = spawn_app().await;
    let body = json!({"username": "ssar", "password": "1234"});

    let response = app.post_login(&body).await;

    assert_eq!(200, response.status().as_u16());
    let authorization = response
        .headers()
        .get("Authorization")
        .expect("The Authorization header should be set.")
        .to_str()
        .unwrap()
        .to_owned();
    assert!(authorization.starts_with("Bearer "));

    let resp = envelope(response).await;
    assert_eq!(resp["msg"], "성공");
    assert!(resp["body"].is_null());
}

#[tokio::test]
async fn the_login_token_opens_protected_routes() {
    let app = spawn_app().await;
    let response = app
        .post_login(&json!({"username": "cos", "password": "1234"}))
        .await;
    let authorization = response.headers()["Authorization"].to_str().unwrap().to_owned();
    let token = authorization.trim_start_matches("Bearer ");

    let response = app
        .post_board(Some(token), &json!({"title": "hello", "content": "from cos"}))
        .await;

    assert_eq!(200, response.status().as_u16());
    let (user_id,): (i64,) = sqlx::query_as("select user_id from board_tb where title = 'hello'")
        .fetch_one(&app.db_pool)
        .await
        .expect("The board should be stored.");
    assert_eq!(user_id, 2);
}

#[tokio::test]
async fn login_returns_a_401_for_bad_credentials() {
    let app = spawn_app().await;
    let test_cases = [
        (json!({"username": "ssar", "password": "4321"}), "wrong password"),
        (json!({"username": "nobody", "password": "1234"}), "unknown username"),
    ];

    for (body, description) in test_cases {
        let response = app.post_login(&body).await;
        assert_eq!(
            401,
            response.status().as_u16(),
            "The API did not return 401 for a {}.",
            description
        );
        assert!(response.headers().get("Authorization").is_none());
        let resp = envelope(response).await;
        assert!(resp["body"].is_null());
    }
}
