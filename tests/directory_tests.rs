//! Directory query tests
//!
//! Search, update, and delete against a real database. Run with
//! TEST_DATABASE_URL pointing at a scratch PostgreSQL instance:
//!
//!   cargo test -- --ignored

use sqlx::PgPool;
use uuid::Uuid;

use teamdir_server::auth::AuthService;
use teamdir_server::models::{RegisterRequest, SearchParams, UpdateUserRequest};
use teamdir_server::services::{DirectoryError, DirectoryService};

async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost/teamdir_test".to_string());

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn auth(pool: PgPool) -> AuthService {
    AuthService::new(pool, "a-secret".to_string(), "r-secret".to_string(), 20, 1)
}

async fn register(service: &AuthService, name: &str, email: &str) -> Uuid {
    service
        .register(&RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "pw1".to_string(),
            confirm_password: "pw1".to_string(),
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_search_matches_name_and_email() {
    let pool = setup_test_db().await;
    let auth = auth(pool.clone());
    let directory = DirectoryService::new(pool);

    // A marker shared by both records, unique to this test run
    let marker = Uuid::new_v4().simple().to_string();
    let by_name = format!("Zo{}e", marker);
    let by_email = format!("zz+{}@example.com", marker);

    register(&auth, &by_name, &format!("{}@example.com", Uuid::new_v4())).await;
    register(&auth, "Someone Else", &by_email).await;

    let page = directory
        .search(&SearchParams {
            search: marker.clone(),
            page: None,
            limit: None,
        })
        .await
        .unwrap();

    assert_eq!(page.total_rows, 2);
    assert!(page.data.iter().any(|u| u.name == by_name));
    assert!(page.data.iter().any(|u| u.email == by_email));
    // Listings never carry hashes or tokens, only {id, name, email}
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_search_paginates() {
    let pool = setup_test_db().await;
    let auth = auth(pool.clone());
    let directory = DirectoryService::new(pool);

    let marker = Uuid::new_v4().simple().to_string();
    for i in 0..3 {
        register(
            &auth,
            &format!("User{} {}", i, marker),
            &format!("{}@example.com", Uuid::new_v4()),
        )
        .await;
    }

    let first = directory
        .search(&SearchParams {
            search: marker.clone(),
            page: Some(0),
            limit: Some(2),
        })
        .await
        .unwrap();

    assert_eq!(first.total_rows, 3);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.data.len(), 2);

    let second = directory
        .search(&SearchParams {
            search: marker,
            page: Some(1),
            limit: Some(2),
        })
        .await
        .unwrap();

    assert_eq!(second.data.len(), 1);
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_update_user_with_optional_password_change() {
    let pool = setup_test_db().await;
    let auth_service = auth(pool.clone());
    let directory = DirectoryService::new(pool);

    let email = format!("{}@example.com", Uuid::new_v4());
    let id = register(&auth_service, "Before", &email).await;

    // Name/email only; password untouched
    let updated = directory
        .update(
            id,
            &UpdateUserRequest {
                name: "After".to_string(),
                email: email.clone(),
                password: None,
                confirm_password: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "After");
    assert!(auth_service.login(&email, "pw1").await.is_ok());

    // Password change requires a matching confirmation
    let mismatched = directory
        .update(
            id,
            &UpdateUserRequest {
                name: "After".to_string(),
                email: email.clone(),
                password: Some("pw2".to_string()),
                confirm_password: Some("nope".to_string()),
            },
        )
        .await;
    assert!(matches!(mismatched, Err(DirectoryError::PasswordMismatch)));

    directory
        .update(
            id,
            &UpdateUserRequest {
                name: "After".to_string(),
                email: email.clone(),
                password: Some("pw2".to_string()),
                confirm_password: Some("pw2".to_string()),
            },
        )
        .await
        .unwrap();

    assert!(auth_service.login(&email, "pw1").await.is_err());
    assert!(auth_service.login(&email, "pw2").await.is_ok());
}

#[tokio::test]
async fn test_huge_page_number_does_not_panic() {
    // Lazy pool: no database is contacted until a query runs, and the
    // offset arithmetic happens before that. A huge page must reach the
    // query (and fail on the dead connection) rather than overflow.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy("postgresql://localhost:1/unreachable")
        .expect("lazy pool construction should not connect");
    let directory = DirectoryService::new(pool);

    let result = directory
        .search(&SearchParams {
            search: String::new(),
            page: Some(i64::MAX),
            limit: Some(100),
        })
        .await;

    assert!(matches!(result, Err(DirectoryError::Database(_))));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_huge_page_number_returns_empty_page() {
    let pool = setup_test_db().await;
    let directory = DirectoryService::new(pool);

    let page = directory
        .search(&SearchParams {
            search: String::new(),
            page: Some(i64::MAX),
            limit: Some(100),
        })
        .await
        .unwrap();

    assert!(page.data.is_empty());
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_update_unknown_user_is_not_found() {
    let pool = setup_test_db().await;
    let directory = DirectoryService::new(pool);

    let result = directory
        .update(
            Uuid::new_v4(),
            &UpdateUserRequest {
                name: "Ghost".to_string(),
                email: "ghost@example.com".to_string(),
                password: None,
                confirm_password: None,
            },
        )
        .await;

    assert!(matches!(result, Err(DirectoryError::UserNotFound)));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_delete_user() {
    let pool = setup_test_db().await;
    let auth_service = auth(pool.clone());
    let directory = DirectoryService::new(pool);

    let email = format!("{}@example.com", Uuid::new_v4());
    let id = register(&auth_service, "Doomed", &email).await;

    directory.delete(id).await.unwrap();

    assert!(matches!(
        directory.delete(id).await,
        Err(DirectoryError::UserNotFound)
    ));
}
