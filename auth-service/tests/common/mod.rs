use std::sync::Arc;

use auth::AuthConfig;
use auth::Authenticator;
use auth::HashingConfig;
use auth::TokenConfig;
use auth::TokenService;
use auth_service::inbound::http::router::create_router;
use auth_service::repositories::InMemoryUserRepository;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_LIFETIME_SECONDS: u64 = 3600;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub tokens: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_config = TokenConfig::new(TEST_SECRET, TEST_LIFETIME_SECONDS);

        // Cheap hashing keeps the suite fast; production costs come from config/default.toml
        let config = AuthConfig {
            token: token_config.clone(),
            hashing: HashingConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
                max_concurrent: 4,
            },
            login_timeout_ms: 5_000,
        };

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let authenticator = Arc::new(
            Authenticator::new(&config, user_repo).expect("Failed to create authenticator"),
        );

        let router = create_router(authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            tokens: TokenService::new(&token_config).expect("Failed to create token service"),
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

    /// Register a user with a valid profile
    pub async fn sign_up(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/signup")
            .json(&json!({
                "username": username,
                "password": password,
                "first_name": "Alice",
                "last_name": "Liddell",
                "gender": "FEMALE",
                "birthdate": "1852-05-04",
                "email": format!("{}@example.com", username)
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the issued token
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/users/login")
            .json(&json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
