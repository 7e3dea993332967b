mod common;

use std::time::Duration as StdDuration;

use auth::TokenGenerator;
use auth::TokenScope;
use catalog_service::domain::token::models::TokenRecord;
use catalog_service::domain::token::ports::TokenRepository;
use catalog_service::domain::user::models::NewUser;
use catalog_service::domain::user::models::Password;
use catalog_service::domain::user::models::Role;
use catalog_service::domain::user::models::User;
use catalog_service::domain::user::models::UserId;
use catalog_service::domain::user::ports::UserRepository;
use catalog_service::outbound::repositories::PostgresTokenRepository;
use catalog_service::outbound::repositories::PostgresUserRepository;
use catalog_service::user::errors::UserError;
use chrono::Duration;
use chrono::Utc;
use common::db::TestDb;

const QUERY_TIMEOUT: StdDuration = StdDuration::from_secs(3);

fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone: Some("+44 20 7946 0000".to_string()),
        address: None,
        password: Password::from_hash("$argon2id$v=19$m=19456,t=2,p=1$stub".to_string()),
        role,
    }
}

async fn insert_token(
    tokens: &PostgresTokenRepository,
    user: &User,
    ttl: Duration,
    scope: TokenScope,
) -> auth::GeneratedToken {
    let token = TokenGenerator::new()
        .generate(ttl, scope)
        .expect("Failed to generate token");

    tokens
        .insert(&TokenRecord {
            hash: token.hash,
            user_id: user.id,
            expiry: token.expiry,
            scope: token.scope,
        })
        .await
        .expect("Failed to insert token");

    token
}

#[tokio::test]
async fn test_create_and_find_user() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone(), QUERY_TIMEOUT);

    let created = users
        .create(new_user("ada@example.com", Role::Client))
        .await
        .expect("Failed to create user");

    assert!(created.id.0 > 0);
    assert_eq!(created.role, Role::Client);
    assert_eq!(created.phone.as_deref(), Some("+44 20 7946 0000"));
    assert!(created.password.plaintext().is_none());

    let by_id = users.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "ada@example.com");
    assert_eq!(by_id.role, Role::Client);
    assert_eq!(by_id.password.hash(), created.password.hash());

    let by_email = users.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);

    assert!(users.find_by_id(&UserId(created.id.0 + 1000)).await.unwrap().is_none());
    assert!(users.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_detected_by_constraint() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone(), QUERY_TIMEOUT);

    users
        .create(new_user("ada@example.com", Role::Customer))
        .await
        .expect("Failed to create user");

    let result = users
        .create(new_user("ada@example.com", Role::Admin))
        .await;

    match result {
        Err(UserError::DuplicateEmail(email)) => assert_eq!(email, "ada@example.com"),
        other => panic!("expected duplicate email, got {:?}", other),
    }
}

#[tokio::test]
async fn test_soft_deleted_user_is_invisible() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone(), QUERY_TIMEOUT);

    let created = users
        .create(new_user("ada@example.com", Role::Customer))
        .await
        .unwrap();

    sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1")
        .bind(created.id.0)
        .execute(&db.pool)
        .await
        .unwrap();

    assert!(users.find_by_id(&created.id).await.unwrap().is_none());
    assert!(users.find_by_email("ada@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_stored_role_is_a_database_error() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone(), QUERY_TIMEOUT);

    let created = users
        .create(new_user("ada@example.com", Role::Customer))
        .await
        .unwrap();

    sqlx::query("UPDATE users SET role = 9 WHERE id = $1")
        .bind(created.id.0)
        .execute(&db.pool)
        .await
        .unwrap();

    assert!(matches!(
        users.find_by_id(&created.id).await,
        Err(UserError::DatabaseError(_))
    ));
}

#[tokio::test]
async fn test_token_lookup_honours_scope_and_expiry() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone(), QUERY_TIMEOUT);
    let tokens = PostgresTokenRepository::new(db.pool.clone(), QUERY_TIMEOUT);

    let user = users
        .create(new_user("ada@example.com", Role::Customer))
        .await
        .unwrap();

    let live = insert_token(&tokens, &user, Duration::hours(1), TokenScope::Authentication).await;
    let expired =
        insert_token(&tokens, &user, Duration::seconds(-1), TokenScope::Authentication).await;
    let activation = insert_token(&tokens, &user, Duration::hours(1), TokenScope::Activation).await;
    let unknown = TokenGenerator::new()
        .generate(Duration::hours(1), TokenScope::Authentication)
        .unwrap();

    // Valid tokens are multi-use until expiry.
    for _ in 0..2 {
        let found = tokens
            .find_user_by_token(&live.hash, TokenScope::Authentication, Utc::now())
            .await
            .unwrap()
            .expect("live token should resolve");
        assert_eq!(found.id, user.id);
        assert_eq!(found.email, "ada@example.com");
    }

    assert!(tokens
        .find_user_by_token(&expired.hash, TokenScope::Authentication, Utc::now())
        .await
        .unwrap()
        .is_none());
    assert!(tokens
        .find_user_by_token(&activation.hash, TokenScope::Authentication, Utc::now())
        .await
        .unwrap()
        .is_none());
    assert!(tokens
        .find_user_by_token(&unknown.hash, TokenScope::Authentication, Utc::now())
        .await
        .unwrap()
        .is_none());

    assert!(tokens
        .find_user_by_token(&activation.hash, TokenScope::Activation, Utc::now())
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_token_of_deleted_user_does_not_resolve() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone(), QUERY_TIMEOUT);
    let tokens = PostgresTokenRepository::new(db.pool.clone(), QUERY_TIMEOUT);

    let user = users
        .create(new_user("ada@example.com", Role::Customer))
        .await
        .unwrap();
    let token = insert_token(&tokens, &user, Duration::hours(1), TokenScope::Authentication).await;

    sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1")
        .bind(user.id.0)
        .execute(&db.pool)
        .await
        .unwrap();

    assert!(tokens
        .find_user_by_token(&token.hash, TokenScope::Authentication, Utc::now())
        .await
        .unwrap()
        .is_none());
}
