//! In-memory repository contract tests.

use domain::User;
use user_service_lib::repository::{InMemoryUserRepository, UserRepository};

fn seeded() -> Vec<User> {
    vec![
        User::new(1, "Alice"),
        User::new(2, "Bob"),
        User::new(3, "Terry"),
    ]
}

#[tokio::test]
async fn new_store_is_seeded_in_insertion_order() {
    let repo = InMemoryUserRepository::new();
    assert_eq!(repo.get_users().await.unwrap(), seeded());
}

#[tokio::test]
async fn added_user_gets_fresh_id_and_is_readable() {
    let repo = InMemoryUserRepository::new();
    let existing: Vec<i32> = repo.get_users().await.unwrap().iter().map(|u| u.id).collect();

    let id = repo.add_user(User::unsaved("Ted")).await.unwrap();

    assert!(id > 0);
    assert!(!existing.contains(&id));
    assert_eq!(repo.get_user(id).await.unwrap(), User::new(id, "Ted"));
}

#[tokio::test]
async fn add_ignores_payload_id() {
    let repo = InMemoryUserRepository::new();

    let id = repo.add_user(User::new(1, "Impostor")).await.unwrap();

    assert_eq!(id, 4);
    assert_eq!(repo.get_user(1).await.unwrap(), User::new(1, "Alice"));
}

#[tokio::test]
async fn unknown_ids_fail_without_changing_the_store() {
    let repo = InMemoryUserRepository::new();

    assert!(repo.get_user(999).await.unwrap_err().is_not_found());
    assert!(repo
        .update_user(999, User::unsaved("X"))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(repo.delete_user(999).await.unwrap_err().is_not_found());

    assert_eq!(repo.get_users().await.unwrap(), seeded());
}

#[tokio::test]
async fn update_is_visible_to_later_reads() {
    let repo = InMemoryUserRepository::new();

    let updated = repo.update_user(2, User::new(77, "X")).await.unwrap();
    assert_eq!(updated, User::new(2, "X"));

    assert_eq!(repo.get_user(2).await.unwrap(), User::new(2, "X"));
    assert!(repo.get_user(77).await.unwrap_err().is_not_found());
    assert_eq!(repo.get_users().await.unwrap()[1], User::new(2, "X"));
}

#[tokio::test]
async fn delete_is_permanent_and_second_delete_fails() {
    let repo = InMemoryUserRepository::new();

    repo.delete_user(1).await.unwrap();

    assert!(repo.get_user(1).await.unwrap_err().is_not_found());
    assert!(repo.delete_user(1).await.unwrap_err().is_not_found());
    assert_eq!(
        repo.get_users().await.unwrap(),
        vec![User::new(2, "Bob"), User::new(3, "Terry")]
    );
}

#[tokio::test]
async fn length_tracks_adds_minus_deletes() {
    let repo = InMemoryUserRepository::empty();

    let a = repo.add_user(User::unsaved("a")).await.unwrap();
    let b = repo.add_user(User::unsaved("b")).await.unwrap();
    repo.add_user(User::unsaved("c")).await.unwrap();
    repo.delete_user(a).await.unwrap();
    repo.delete_user(b).await.unwrap();
    // failed delete does not count
    let _ = repo.delete_user(b).await;
    repo.add_user(User::unsaved("d")).await.unwrap();

    assert_eq!(repo.get_users().await.unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_adds_get_distinct_ids() {
    use std::collections::HashSet;
    use std::sync::Arc;

    let repo = Arc::new(InMemoryUserRepository::empty());
    let mut handles = Vec::new();
    for i in 0..32 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.add_user(User::unsaved(format!("user-{}", i))).await.unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }

    assert_eq!(ids.len(), 32);
    assert_eq!(repo.get_users().await.unwrap().len(), 32);
}
