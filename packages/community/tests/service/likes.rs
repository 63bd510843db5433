use std::collections::HashSet;

use community::entity::post_like;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::common::TestFeed;

#[tokio::test]
async fn like_lifecycle_is_idempotent() {
    let t = TestFeed::new().await;
    let post = t.post("alice", "hello").await;

    let as_bob = t.feed.get_post(&post, "bob").await.unwrap();
    assert_eq!(as_bob.like_count, 0);
    assert!(!as_bob.viewer_has_liked);

    assert!(t.feed.like_post(&post, "bob").await.unwrap());
    let as_bob = t.feed.get_post(&post, "bob").await.unwrap();
    assert_eq!(as_bob.like_count, 1);
    assert!(as_bob.viewer_has_liked);

    // Second like is a no-op.
    assert!(!t.feed.like_post(&post, "bob").await.unwrap());
    assert_eq!(t.feed.like_count(&post).await.unwrap(), 1);

    // The author sees the count but not bob's flag.
    let as_alice = t.feed.get_post(&post, "alice").await.unwrap();
    assert_eq!(as_alice.like_count, 1);
    assert!(!as_alice.viewer_has_liked);

    assert!(t.feed.unlike_post(&post, "bob").await.unwrap());
    let as_bob = t.feed.get_post(&post, "bob").await.unwrap();
    assert_eq!(as_bob.like_count, 0);
    assert!(!as_bob.viewer_has_liked);
}

#[tokio::test]
async fn unliking_without_a_like_returns_false() {
    let t = TestFeed::new().await;
    let post = t.post("alice", "hello").await;

    assert!(!t.feed.unlike_post(&post, "bob").await.unwrap());
    assert_eq!(t.feed.like_count(&post).await.unwrap(), 0);
}

#[tokio::test]
async fn liking_a_missing_post_is_not_found() {
    let t = TestFeed::new().await;

    let err = t.feed.like_post("missing", "bob").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(post_like::Entity::find().count(&t.db).await.unwrap(), 0);
}

#[tokio::test]
async fn like_count_counts_distinct_members() {
    let t = TestFeed::new().await;
    let post = t.post("alice", "popular").await;

    for user in ["bob", "carol", "dave", "bob", "carol"] {
        t.feed.like_post(&post, user).await.unwrap();
    }

    assert_eq!(t.feed.like_count(&post).await.unwrap(), 3);
    assert!(t.feed.has_liked(&post, "dave").await.unwrap());
    assert!(!t.feed.has_liked(&post, "alice").await.unwrap());
}

#[tokio::test]
async fn concurrent_duplicate_likes_store_one_row() {
    let t = TestFeed::new().await;
    let post = t.post("alice", "race").await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let feed = t.feed.clone();
            let post = post.clone();
            tokio::spawn(async move { feed.like_post(&post, "bob").await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(t.feed.like_count(&post).await.unwrap(), 1);
}

#[tokio::test]
async fn store_rejects_duplicate_like_rows() {
    use sea_orm::{ActiveModelTrait, Set};

    let t = TestFeed::new().await;
    let post = t.post("alice", "constraint").await;
    assert!(t.feed.like_post(&post, "bob").await.unwrap());

    let duplicate = post_like::ActiveModel {
        id: Set("manual-duplicate".into()),
        post_id: Set(post.clone()),
        user_id: Set("bob".into()),
        created_at: Set(0),
        ..Default::default()
    }
    .insert(&t.db)
    .await;

    assert!(duplicate.is_err());
    let ids: HashSet<String> = post_like::Entity::find()
        .all(&t.db)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.user_id)
        .collect();
    assert_eq!(ids, HashSet::from(["bob".to_string()]));
}
