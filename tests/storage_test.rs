//! Repository behavior against an in-memory database.

use sqlx::sqlite::SqlitePoolOptions;

use postcraft::db::posts::{NewPost, PostChanges};
use postcraft::db::models::PostStatus;
use postcraft::db::{Database, PostRepository, UserRepository};
use postcraft::error::Error;

async fn setup() -> Database {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let database = Database::from_pool(pool);
    database.run_migrations().await.expect("migrations");
    database
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let database = setup().await;
    let users = UserRepository::new(database.pool().clone());

    users
        .create("Alice", "alice@example.com", "hash-1")
        .await
        .expect("first create");

    let err = users
        .create("Other Alice", "alice@example.com", "hash-2")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn find_by_email_round_trip() {
    let database = setup().await;
    let users = UserRepository::new(database.pool().clone());

    let created = users
        .create("Alice", "alice@example.com", "hash")
        .await
        .unwrap();

    let found = users
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("user exists");
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Alice");

    assert!(users
        .find_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn scheduled_post_round_trip() {
    let database = setup().await;
    let users = UserRepository::new(database.pool().clone());
    let posts = PostRepository::new(database.pool().clone());

    let user = users.create("Alice", "alice@example.com", "hash").await.unwrap();

    let scheduled_for = "2030-01-01T09:00:00Z".parse().unwrap();
    let created = posts
        .create(
            &user.id,
            NewPost {
                content: "Scheduled".to_string(),
                media_urls: vec!["https://images.example/a.png".to_string()],
                social_account_id: Some("acct-1".to_string()),
                schedule: Some((scheduled_for, "Europe/Berlin".to_string())),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.status, PostStatus::Scheduled);

    let loaded = posts
        .find_for_user(&created.id, &user.id)
        .await
        .unwrap()
        .expect("post exists");
    let schedule = loaded.schedule.expect("schedule persisted");
    assert_eq!(schedule.scheduled_for, scheduled_for);
    assert_eq!(schedule.timezone, "Europe/Berlin");
    assert_eq!(loaded.media_urls, vec!["https://images.example/a.png"]);
}

#[tokio::test]
async fn update_missing_post_is_not_found() {
    let database = setup().await;
    let posts = PostRepository::new(database.pool().clone());

    let err = posts
        .update("no-such-id", "no-such-user", PostChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = posts.delete("no-such-id", "no-such-user").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn list_is_scoped_to_owner() {
    let database = setup().await;
    let users = UserRepository::new(database.pool().clone());
    let posts = PostRepository::new(database.pool().clone());

    let alice = users.create("Alice", "alice@example.com", "hash").await.unwrap();
    let bob = users.create("Bob", "bob@example.com", "hash").await.unwrap();

    posts
        .create(
            &alice.id,
            NewPost {
                content: "Alice's".to_string(),
                media_urls: vec![],
                social_account_id: None,
                schedule: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(posts.list_for_user(&alice.id).await.unwrap().len(), 1);
    assert_eq!(posts.list_for_user(&bob.id).await.unwrap().len(), 0);
}
