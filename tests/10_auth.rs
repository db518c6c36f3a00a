mod common;

use anyhow::Result;
use tasktrack_api::auth::validate_jwt;
use tasktrack_api::services::{RegisterDraft, ServiceError};

fn draft(username: &str, email: &str) -> RegisterDraft {
    RegisterDraft {
        username: username.to_string(),
        email: email.to_string(),
        password: common::PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn register_returns_token_for_new_user() -> Result<()> {
    let state = common::state();
    let response = state.auth.register(draft("alice", "alice@example.com")).await?;

    assert_eq!(response.username, "alice");
    assert_eq!(response.email, "alice@example.com");
    let claims = validate_jwt(&response.token, &state.config.security.jwt_secret)?;
    assert_eq!(claims.sub, "alice");
    assert!(claims.exp > claims.iat);
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_reported_before_email() -> Result<()> {
    let state = common::state();
    state.auth.register(draft("alice", "alice@example.com")).await?;

    let err = state.auth.register(draft("alice", "alice@example.com")).await.unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyExists(ref m) if m == "Username already exists"), "{err:?}");

    let err = state.auth.register(draft("alicia", "alice@example.com")).await.unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyExists(ref m) if m == "Email already exists"), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn login_round_trip() -> Result<()> {
    let state = common::state();
    state.auth.register(draft("bob", "bob@example.com")).await?;

    let response = state.auth.login("bob", common::PASSWORD).await?;
    assert_eq!(response.username, "bob");
    assert_eq!(response.email, "bob@example.com");
    assert!(validate_jwt(&response.token, &state.config.security.jwt_secret).is_ok());
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() -> Result<()> {
    let state = common::state();
    state.auth.register(draft("carol", "carol@example.com")).await?;

    let wrong = state.auth.login("carol", "not-the-password").await.unwrap_err();
    let unknown = state.auth.login("nobody", common::PASSWORD).await.unwrap_err();

    for err in [wrong, unknown] {
        assert!(
            matches!(err, ServiceError::Unauthenticated(ref m) if m == "Invalid username or password"),
            "{err:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn token_from_other_secret_is_rejected() -> Result<()> {
    let state = common::state();
    let token = common::register(&state, "dave").await?;
    assert!(validate_jwt(&token, "some-other-secret").is_err());
    Ok(())
}

#[tokio::test]
async fn huge_token_lifetime_still_yields_a_live_token() -> Result<()> {
    let mut config = common::test_config();
    config.security.jwt_expiry_hours = u64::MAX;
    let state = common::state_with(config);

    let response = state.auth.register(draft("dave", "dave@example.com")).await?;
    let claims = validate_jwt(&response.token, &state.config.security.jwt_secret)?;
    assert_eq!(claims.exp, i64::MAX);
    Ok(())
}

#[tokio::test]
async fn username_is_stored_exactly_as_registered() -> Result<()> {
    let state = common::state();
    state.auth.register(draft(" erin ", "erin@example.com")).await?;

    let response = state.auth.login(" erin ", common::PASSWORD).await?;
    assert_eq!(response.username, " erin ");
    assert!(state.auth.login("erin", common::PASSWORD).await.is_err());
    Ok(())
}
