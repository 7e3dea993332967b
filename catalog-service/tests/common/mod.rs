#![allow(dead_code)]

pub mod db;

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenHash;
use auth::TokenScope;
use catalog_service::domain::token::errors::TokenError;
use catalog_service::domain::token::models::TokenRecord;
use catalog_service::domain::token::ports::TokenRepository;
use catalog_service::domain::token::service::TokenService;
use catalog_service::domain::user::models::NewUser;
use catalog_service::domain::user::models::User;
use catalog_service::domain::user::models::UserId;
use catalog_service::domain::user::ports::UserRepository;
use catalog_service::domain::user::service::UserService;
use catalog_service::inbound::http::handlers::healthcheck::SystemInfo;
use catalog_service::inbound::http::router::create_router;
use catalog_service::user::errors::UserError;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// User store with the same uniqueness rule as the `users_email_key`
/// constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let now = Utc::now();
        let created = User {
            id: UserId(users.len() as i64 + 1),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            password: user.password,
            role: user.role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// Token store applying the hash, scope and expiry predicate of the SQL
/// lookup.
pub struct InMemoryTokenRepository {
    users: Arc<InMemoryUserRepository>,
    tokens: Mutex<Vec<TokenRecord>>,
}

impl InMemoryTokenRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            users,
            tokens: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn insert(&self, token: &TokenRecord) -> Result<(), TokenError> {
        self.tokens.lock().unwrap().push(token.clone());
        Ok(())
    }

    async fn find_user_by_token(
        &self,
        hash: &TokenHash,
        scope: TokenScope,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, TokenError> {
        let user_id = self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.hash == *hash && t.scope == scope && t.expiry > now)
            .map(|t| t.user_id);

        match user_id {
            Some(id) => Ok(self.users.find_by_id(&id).await?),
            None => Ok(None),
        }
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_token_ttl(Duration::hours(24)).await
    }

    pub async fn spawn_with_token_ttl(authentication_ttl: Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repo = Arc::new(InMemoryUserRepository::default());
        let token_repo = Arc::new(InMemoryTokenRepository::new(Arc::clone(&user_repo)));

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repo)));
        let token_service = Arc::new(TokenService::new(user_repo, token_repo, authentication_ttl));

        let router = create_router(user_service, token_service, SystemInfo::new("test"));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the response
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/v1/users")
            .json(&serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to send register request")
    }

    /// Log in and return the response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/v1/tokens/authentication")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to send login request")
    }

    /// Register, log in and return the plaintext bearer token
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        assert_eq!(self.register(email, password).await.status(), 201);

        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse login response");

        body["data"]["authentication_token"]["token"]
            .as_str()
            .expect("Token missing from login response")
            .to_string()
    }
}
