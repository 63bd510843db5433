use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn user_page_shows_profile_and_posts() {
    let app = TestApp::spawn().await;
    let alice = app.create_member("alice").await;
    let bob = app.create_member("bob").await;
    app.create_post(&bob, "one").await;
    app.create_post(&bob, "two").await;
    app.create_post(&alice, "not bob's").await;
    app.post_with_token(&routes::follow("bob"), &json!({}), &alice)
        .await;

    let res = app.get_with_token(&routes::user("bob"), &alice).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["profile"]["user"]["id"], "bob");
    assert_eq!(res.body["profile"]["follower_count"], 1);
    assert_eq!(res.body["profile"]["following_count"], 0);
    assert_eq!(res.body["profile"]["viewer_is_following"], true);
    assert_eq!(res.body["posts"]["total"], 2);
    assert_eq!(res.body["posts"]["posts"][0]["content"], "two");
}

#[tokio::test]
async fn own_page_never_claims_self_follow() {
    let app = TestApp::spawn().await;
    let alice = app.create_member("alice").await;

    let res = app.get_with_token(&routes::user("alice"), &alice).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["profile"]["viewer_is_following"], false);
}

#[tokio::test]
async fn unknown_user_page_is_not_found() {
    let app = TestApp::spawn().await;
    let alice = app.create_member("alice").await;

    let res = app.get_with_token(&routes::user("ghost"), &alice).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}
