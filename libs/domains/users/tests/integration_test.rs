//! Integration tests for the Users domain against a real PostgreSQL instance
//!
//! Requires Docker: each test spins up its own Postgres container via
//! testcontainers and applies the workspace migrations.

use domain_users::{
    CreateUser, PgUserRepository, UpdateUser, UserError, UserFilter, UserRepository, UserService,
};
use test_utils::{TestDataBuilder, TestDatabase};

fn sample_user(builder: &TestDataBuilder, index: u32) -> CreateUser {
    let suffix = format!("{:02}", index);
    CreateUser {
        first_name: builder.name("First", &suffix),
        last_name: builder.name("Last", &suffix),
        email: builder.email(&suffix),
        phone: builder.phone(index),
    }
}

#[tokio::test]
async fn test_create_and_get_user() {
    let db = TestDatabase::new().await;
    let repository = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = sample_user(&builder, 0);
    let created = repository.create(input.clone()).await.unwrap();

    assert_eq!(created.first_name, input.first_name);
    assert_eq!(created.email, input.email);

    let fetched = repository.get(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.phone, input.phone);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_get_missing_user_returns_not_found() {
    let db = TestDatabase::new().await;
    let repository = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("get_missing");

    let missing_id = builder.user_id();
    let result = repository.get(missing_id).await;

    assert!(matches!(result, Err(UserError::NotFound(id)) if id == missing_id));
}

#[tokio::test]
async fn test_partial_update_changes_only_supplied_fields() {
    let db = TestDatabase::new().await;
    let repository = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("partial_update");

    let created = repository.create(sample_user(&builder, 0)).await.unwrap();

    let update = UpdateUser {
        phone: Some(builder.phone(99)),
        ..Default::default()
    };
    let updated = repository.update(created.id, update).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.phone, builder.phone(99));
    assert_eq!(updated.first_name, created.first_name);
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.email, created.email);

    // updated_at is refreshed by the database trigger
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_missing_user_returns_not_found() {
    let db = TestDatabase::new().await;
    let repository = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_missing");

    let update = UpdateUser {
        first_name: Some("Ghost".to_string()),
        ..Default::default()
    };
    let result = repository.update(builder.user_id(), update).await;

    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_user_then_not_found() {
    let db = TestDatabase::new().await;
    let repository = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_user");

    let created = repository.create(sample_user(&builder, 0)).await.unwrap();

    repository.delete(created.id).await.unwrap();

    let result = repository.get(created.id).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));

    // Second delete reports the missing row
    let result = repository.delete(created.id).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_filters_match_case_insensitive_substrings() {
    let db = TestDatabase::new().await;
    let repository = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("filters");

    for (i, (first, last)) in [("Anna", "Smith"), ("DIANNA", "Jones"), ("Bob", "Smith")]
        .into_iter()
        .enumerate()
    {
        repository
            .create(CreateUser {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: builder.email(first),
                phone: builder.phone(i as u32),
            })
            .await
            .unwrap();
    }

    let filter = UserFilter {
        first_name: Some("ann".to_string()),
        ..Default::default()
    };
    let matches = repository.get_all(filter.clone(), 0, 10).await.unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(repository.count(filter).await.unwrap(), 2);

    // Multiple filters are ANDed together
    let filter = UserFilter {
        first_name: Some("ann".to_string()),
        last_name: Some("smith".to_string()),
        ..Default::default()
    };
    let matches = repository.get_all(filter.clone(), 0, 10).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].first_name, "Anna");
    assert_eq!(repository.count(filter).await.unwrap(), 1);
}

#[tokio::test]
async fn test_pagination_windows_newest_first() {
    let db = TestDatabase::new().await;
    let repository = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pagination");

    for i in 0..7 {
        repository.create(sample_user(&builder, i)).await.unwrap();
        // Ensure distinct created_at values for a deterministic ordering
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let filter = UserFilter::default();
    assert_eq!(repository.count(filter.clone()).await.unwrap(), 7);

    let first_page = repository.get_all(filter.clone(), 0, 5).await.unwrap();
    assert_eq!(first_page.len(), 5);
    assert_eq!(first_page[0].first_name, builder.name("First", "06"));

    let second_page = repository.get_all(filter.clone(), 5, 5).await.unwrap();
    assert_eq!(second_page.len(), 2);
    assert_eq!(second_page[1].first_name, builder.name("First", "00"));

    // Windows do not overlap
    let first_ids: Vec<_> = first_page.iter().map(|u| u.id).collect();
    assert!(second_page.iter().all(|u| !first_ids.contains(&u.id)));

    // Offset past the end yields an empty page
    let empty = repository.get_all(filter, 10, 5).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_service_rejects_invalid_input_before_storage() {
    let db = TestDatabase::new().await;
    let repository = PgUserRepository::new(db.connection());
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service_validation");

    let mut input = sample_user(&builder, 0);
    input.email = String::new();

    let result = service.create(input).await;
    assert!(matches!(result, Err(UserError::Validation(_))));

    // Nothing reached the database
    assert_eq!(repository.count(UserFilter::default()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_creates_produce_distinct_users() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("concurrent");

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let repository = PgUserRepository::new(db.connection());
            let input = sample_user(&builder, i);
            tokio::spawn(async move { repository.create(input).await })
        })
        .collect();

    let created: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let mut ids: Vec<_> = created.iter().map(|u| u.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);

    // Each record kept its own field values
    for user in &created {
        let suffix = user.first_name.rsplit('-').next().unwrap();
        assert_eq!(user.email, builder.email(suffix));
    }

    let repository = PgUserRepository::new(db.connection());
    assert_eq!(repository.count(UserFilter::default()).await.unwrap(), 5);
}
