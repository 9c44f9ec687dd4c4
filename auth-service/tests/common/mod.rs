use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use auth_service::credential::errors::DirectoryError;
use auth_service::credential::models::EmailAddress;
use auth_service::credential::models::NewUser;
use auth_service::credential::models::User;
use auth_service::credential::models::UserId;
use auth_service::credential::ports::UserDirectory;
use auth_service::domain::credential::service::CredentialService;
use chrono::Duration;
use tokio::sync::RwLock;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory user directory keyed by exact email.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserDirectory {
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn get(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.read().await.get(email.as_str()).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DirectoryError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.email.as_str()) {
            return Err(DirectoryError::DuplicateEmail(user.email.to_string()));
        }

        let created = User {
            id: UserId::new(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
        };
        users.insert(created.email.as_str().to_string(), created.clone());

        Ok(created)
    }
}

/// Test application wired with the in-memory directory
pub struct TestApp {
    pub directory: Arc<InMemoryUserDirectory>,
    pub authenticator: Arc<Authenticator>,
    pub service: Arc<CredentialService<InMemoryUserDirectory>>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(2))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let directory = Arc::new(InMemoryUserDirectory::default());
        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET, ttl)
                .expect("Failed to create authenticator")
                .with_password_hasher(PasswordHasher::with_cost(4)),
        );
        let service = Arc::new(CredentialService::new(
            Arc::clone(&directory),
            Arc::clone(&authenticator),
        ));

        Self {
            directory,
            authenticator,
            service,
        }
    }
}
