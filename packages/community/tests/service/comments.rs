use community::{CommentForm, FeedError};

use crate::common::TestFeed;

#[tokio::test]
async fn comments_are_listed_oldest_first() {
    let t = TestFeed::new().await;
    t.add_user("bob").await;
    let post = t.post("alice", "thread").await;
    let c1 = t.comment(&post, "bob", "one").await;
    let c2 = t.comment(&post, "carol", "two").await;
    let c3 = t.comment(&post, "bob", "three").await;

    let comments = t.feed.list_comments(&post, "alice").await.unwrap();

    let ids: Vec<&str> = comments.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![c1.as_str(), c2.as_str(), c3.as_str()]);
    assert!(
        comments
            .windows(2)
            .all(|w| w[0].created_at <= w[1].created_at)
    );
    assert_eq!(comments[0].author.as_ref().map(|a| a.name.as_str()), Some("bob name"));
    assert!(comments[1].author.is_none());
}

#[tokio::test]
async fn comment_count_follows_comments() {
    let t = TestFeed::new().await;
    let post = t.post("alice", "count me").await;
    t.comment(&post, "bob", "a").await;
    t.comment(&post, "bob", "b").await;

    let view = t.feed.get_post(&post, "alice").await.unwrap();
    assert_eq!(view.comment_count, 2);
}

#[tokio::test]
async fn blank_comment_is_rejected() {
    let t = TestFeed::new().await;
    let post = t.post("alice", "quiet").await;

    let err = t
        .feed
        .create_comment(
            &post,
            CommentForm {
                content: "\t  ".into(),
            },
            "bob",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::Validation(_)));
    assert!(t.feed.list_comments(&post, "bob").await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_on_missing_post_is_not_found() {
    let t = TestFeed::new().await;

    let err = t
        .feed
        .create_comment(
            "missing",
            CommentForm {
                content: "hello?".into(),
            },
            "bob",
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn created_comment_carries_author_profile() {
    let t = TestFeed::new().await;
    t.add_user("bob").await;
    let post = t.post("alice", "hi").await;

    let view = t
        .feed
        .create_comment(
            &post,
            CommentForm {
                content: "hey".into(),
            },
            "bob",
        )
        .await
        .unwrap();

    assert_eq!(view.post_id, post);
    assert_eq!(view.content, "hey");
    assert_eq!(view.author.map(|a| a.email), Some("bob@example.com".to_string()));
}

#[tokio::test]
async fn only_the_comment_author_can_delete_it() {
    let t = TestFeed::new().await;
    let post = t.post("alice", "my post").await;
    let comment = t.comment(&post, "bob", "bob's comment").await;

    // The post author has no say over other members' comments.
    assert!(!t.feed.delete_comment(&comment, "alice").await.unwrap());
    assert_eq!(t.feed.list_comments(&post, "alice").await.unwrap().len(), 1);

    assert!(t.feed.delete_comment(&comment, "bob").await.unwrap());
    assert!(t.feed.list_comments(&post, "alice").await.unwrap().is_empty());
    assert!(!t.feed.delete_comment(&comment, "bob").await.unwrap());
}

#[tokio::test]
async fn deleting_through_a_missing_post_is_not_found() {
    let t = TestFeed::new().await;
    let post = t.post("alice", "my post").await;
    let comment = t.comment(&post, "bob", "bob's comment").await;

    let err = t
        .feed
        .delete_post_comment("ghost", &comment, "bob")
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::NotFound("Post")));
    assert_eq!(t.feed.list_comments(&post, "bob").await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_through_the_wrong_post_keeps_the_comment() {
    let t = TestFeed::new().await;
    let post = t.post("alice", "my post").await;
    let other = t.post("alice", "another post").await;
    let comment = t.comment(&post, "bob", "bob's comment").await;

    assert!(!t.feed.delete_post_comment(&other, &comment, "bob").await.unwrap());
    assert_eq!(t.feed.list_comments(&post, "bob").await.unwrap().len(), 1);

    assert!(t.feed.delete_post_comment(&post, &comment, "bob").await.unwrap());
    assert!(t.feed.list_comments(&post, "bob").await.unwrap().is_empty());
}
