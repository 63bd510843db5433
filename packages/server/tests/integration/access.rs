use crate::common::{TestApp, routes};

#[tokio::test]
async fn missing_token_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::POSTS).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let app = TestApp::spawn().await;
    let token = server::utils::jwt::sign("alice", "user", "wrong-secret").unwrap();

    let res = app.get_with_token(routes::POSTS, &token).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn unverified_account_is_denied() {
    let app = TestApp::spawn().await;
    let token = app.create_user_with_role("newbie", "pending").await;

    let res = app.get_with_token(routes::POSTS, &token).await;

    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn admin_is_a_verified_member() {
    let app = TestApp::spawn().await;
    let token = app.create_user_with_role("root", "admin").await;

    let res = app.get_with_token(routes::POSTS, &token).await;

    assert_eq!(res.status, 200);
}

#[tokio::test]
async fn disabled_feature_answers_forbidden() {
    let app = TestApp::spawn_disabled().await;
    let alice = app.create_member("alice").await;

    let res = app.get_with_token(routes::POSTS, &alice).await;

    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "FEATURE_DISABLED");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    assert!(res.body["paths"]["/api/v1/community/posts"].is_object());
}
