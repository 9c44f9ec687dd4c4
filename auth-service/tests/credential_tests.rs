mod common;

use auth::Authenticator;
use auth::Claims;
use auth_service::credential::errors::CredentialError;
use auth_service::credential::models::DisplayName;
use auth_service::credential::models::EmailAddress;
use auth_service::credential::models::LoginCommand;
use auth_service::credential::models::PlainPassword;
use auth_service::credential::models::RegisterCommand;
use auth_service::credential::models::UserIdentity;
use auth_service::credential::ports::CredentialServicePort;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;

fn register(email: &str, name: &str, password: &str) -> RegisterCommand {
    RegisterCommand::new(
        EmailAddress::new(email.to_string()).unwrap(),
        DisplayName::new(name.to_string()).unwrap(),
        PlainPassword::new(password.to_string()).unwrap(),
    )
}

fn login(email: &str, password: &str) -> LoginCommand {
    LoginCommand::new(
        EmailAddress::new(email.to_string()).unwrap(),
        PlainPassword::new(password.to_string()).unwrap(),
    )
}

#[tokio::test]
async fn test_register_login_scenario() {
    let app = TestApp::new();

    let registered = app
        .service
        .register(register("a@x.com", "A", "secret1"))
        .await
        .expect("Registration failed");

    assert_eq!(registered.user.email, "a@x.com");
    assert_eq!(registered.user.name, "A");
    assert!(!registered.token.is_empty());

    let logged_in = app
        .service
        .login(login("a@x.com", "secret1"))
        .await
        .expect("Login failed");

    assert_eq!(logged_in.user, registered.user);
    assert_ne!(logged_in.token, registered.token);

    let error = app
        .service
        .login(login("a@x.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 400);
    assert_eq!(error.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_stored_credential_is_hashed() {
    let app = TestApp::new();

    app.service
        .register(register("a@x.com", "A", "secret1"))
        .await
        .unwrap();

    let stored = app.directory.get("a@x.com").await.expect("User not stored");
    assert_ne!(stored.password_hash, "secret1");
    assert!(stored.password_hash.starts_with("$2b$"));
    assert!(app
        .authenticator
        .verify_password("secret1", &stored.password_hash));
}

#[tokio::test]
async fn test_register_twice_fails_with_duplicate_user() {
    let app = TestApp::new();

    app.service
        .register(register("a@x.com", "A", "secret1"))
        .await
        .unwrap();

    let error = app
        .service
        .register(register("a@x.com", "Other", "secret2"))
        .await
        .unwrap_err();

    assert_eq!(error, CredentialError::DuplicateUser);
    assert_eq!(error.status_code(), 400);
    assert_eq!(error.to_string(), "User already registered");
    assert_eq!(app.directory.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_registration_creates_one_user() {
    let app = TestApp::new();

    let first = app.service.register(register("a@x.com", "A", "secret1"));
    let second = app.service.register(register("a@x.com", "B", "secret2"));
    let (first, second) = tokio::join!(first, second);

    assert!(first.is_ok() ^ second.is_ok());
    let error = first.err().or(second.err()).unwrap();
    assert_eq!(error, CredentialError::DuplicateUser);
    assert_eq!(app.directory.len().await, 1);
}

#[tokio::test]
async fn test_email_lookup_is_case_sensitive() {
    let app = TestApp::new();

    app.service
        .register(register("a@x.com", "A", "secret1"))
        .await
        .unwrap();

    let result = app.service.login(login("A@x.com", "secret1")).await;
    assert_eq!(result.unwrap_err(), CredentialError::InvalidCredentials);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();

    app.service
        .register(register("a@x.com", "A", "secret1"))
        .await
        .unwrap();

    let unknown = app
        .service
        .login(login("nobody@x.com", "secret1"))
        .await
        .unwrap_err();
    let wrong = app
        .service
        .login(login("a@x.com", "secret2"))
        .await
        .unwrap_err();

    assert_eq!(unknown, wrong);
    assert_eq!(unknown.status_code(), wrong.status_code());
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn test_verify_and_reissue() {
    let app = TestApp::new();

    let registered = app
        .service
        .register(register("a@x.com", "A", "secret1"))
        .await
        .unwrap();

    // Backdate the original so the new window is strictly later
    let original = app
        .authenticator
        .jwt_handler()
        .encode_at(&registered.user, Utc::now().timestamp() - 60, "original")
        .unwrap();

    let reissued = app
        .service
        .verify_and_reissue(&original)
        .await
        .expect("Verification failed");

    assert_eq!(reissued.user, registered.user);

    let before: Claims<UserIdentity> = app.authenticator.validate_token(&original).unwrap();
    let after: Claims<UserIdentity> = app
        .authenticator
        .validate_token(&reissued.token)
        .unwrap();
    assert!(after.exp > before.exp);
    assert_eq!(after.identity, before.identity);
}

#[tokio::test]
async fn test_verify_rejects_expired_token() {
    let app = TestApp::new();

    let registered = app
        .service
        .register(register("a@x.com", "A", "secret1"))
        .await
        .unwrap();

    let expired = app
        .authenticator
        .jwt_handler()
        .encode_at(&registered.user, Utc::now().timestamp() - 3 * 60 * 60, "old")
        .unwrap();

    let error = app.service.verify_and_reissue(&expired).await.unwrap_err();

    assert_eq!(error, CredentialError::Unauthorized);
    assert_eq!(error.status_code(), 401);
}

#[tokio::test]
async fn test_verify_depends_only_on_shared_secret() {
    let app = TestApp::new();
    let peer = TestApp::new();

    let foreign = Authenticator::new(b"a-different-secret-of-enough-length!", Duration::hours(2))
        .unwrap()
        .generate_token(&UserIdentity {
            id: "forged".to_string(),
            email: "a@x.com".to_string(),
            name: "A".to_string(),
        })
        .unwrap();

    assert_eq!(
        app.service.verify_and_reissue(&foreign).await.unwrap_err(),
        CredentialError::Unauthorized
    );

    // Another instance signing with the same secret is trusted
    let registered = peer
        .service
        .register(register("b@x.com", "B", "secret1"))
        .await
        .unwrap();
    let reissued = app
        .service
        .verify_and_reissue(&registered.token)
        .await
        .expect("Verification failed");
    assert_eq!(reissued.user, registered.user);
}
