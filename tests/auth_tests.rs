// tests/auth_tests.rs

mod common;

use common::test_app;
use estoque_backend::common::error::AppError;
use estoque_backend::db::PasswordResetTokenRepository;
use estoque_backend::models::auth::{
    LoginUserPayload, PasswordResetToken, RegisterUserPayload, UserRole,
};
use uuid::Uuid;

fn register(email: &str, password: &str) -> RegisterUserPayload {
    RegisterUserPayload {
        email: email.to_string(),
        password: password.to_string(),
        role: None,
    }
}

fn login(email: &str, password: &str) -> LoginUserPayload {
    LoginUserPayload {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn register_login_and_validate_token() {
    let app = test_app();

    let user = app
        .auth
        .register(register("ana@exemplo.com", "senha123"))
        .await
        .unwrap();
    assert_eq!(user.role, UserRole::Operator);

    let response = app
        .auth
        .login(login("ana@exemplo.com", "senha123"))
        .await
        .unwrap();

    let validated = app.auth.validate_token(&response.token).await.unwrap();
    assert_eq!(validated.id, user.id);
    assert_eq!(validated.email, "ana@exemplo.com");
}

#[tokio::test]
async fn explicit_admin_role_is_kept() {
    let app = test_app();
    let user = app
        .auth
        .register(RegisterUserPayload {
            email: "chefe@exemplo.com".to_string(),
            password: "senha123".to_string(),
            role: Some(UserRole::Admin),
        })
        .await
        .unwrap();
    assert_eq!(user.role, UserRole::Admin);
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let app = test_app();
    app.auth
        .register(register("bia@exemplo.com", "senha123"))
        .await
        .unwrap();

    let dup = app
        .auth
        .register(register("bia@exemplo.com", "outrasenha"))
        .await;
    assert!(matches!(dup, Err(AppError::EmailAlreadyExists)));
}

#[tokio::test]
async fn invalid_email_fails_validation() {
    let app = test_app();
    let result = app.auth.register(register("sem-arroba", "senha123")).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = test_app();
    app.auth
        .register(register("caio@exemplo.com", "senha123"))
        .await
        .unwrap();

    let wrong = app.auth.login(login("caio@exemplo.com", "senhaerrada")).await;
    let unknown = app.auth.login(login("ninguem@exemplo.com", "senha123")).await;

    assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
    assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn garbage_token_is_invalid() {
    let app = test_app();
    let result = app.auth.validate_token("nao-é-um-jwt").await;
    assert!(matches!(result, Err(AppError::InvalidToken)));
}

#[tokio::test]
async fn password_reset_flow_consumes_token() {
    let app = test_app();
    app.auth
        .register(register("davi@exemplo.com", "senha123"))
        .await
        .unwrap();

    let token = app
        .auth
        .request_password_reset("davi@exemplo.com")
        .await
        .unwrap()
        .expect("deveria emitir token para e-mail conhecido");

    app.auth.reset_password(&token, "novasenha").await.unwrap();

    // Senha nova funciona, a antiga não.
    app.auth
        .login(login("davi@exemplo.com", "novasenha"))
        .await
        .unwrap();
    assert!(matches!(
        app.auth.login(login("davi@exemplo.com", "senha123")).await,
        Err(AppError::InvalidCredentials)
    ));

    // Uso único: o mesmo token não redefine de novo.
    let reuse = app.auth.reset_password(&token, "maisoutra").await;
    assert!(matches!(reuse, Err(AppError::InvalidToken)));
}

#[tokio::test]
async fn reset_for_unknown_email_is_silent() {
    let app = test_app();
    let result = app
        .auth
        .request_password_reset("fantasma@exemplo.com")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn expired_reset_token_is_rejected() {
    let app = test_app();
    let user = app
        .auth
        .register(register("eva@exemplo.com", "senha123"))
        .await
        .unwrap();

    // Token plantado já vencido.
    let expired = PasswordResetToken {
        id: Uuid::new_v4(),
        user_id: user.id,
        token: "token-vencido".to_string(),
        expires_at: chrono::Utc::now() - chrono::Duration::minutes(5),
        used: false,
        created_at: chrono::Utc::now() - chrono::Duration::hours(2),
    };
    PasswordResetTokenRepository::insert(&app.store, &expired)
        .await
        .unwrap();

    let result = app.auth.reset_password("token-vencido", "novasenha").await;
    assert!(matches!(result, Err(AppError::TokenExpired)));

    // A senha original continua valendo.
    app.auth
        .login(login("eva@exemplo.com", "senha123"))
        .await
        .unwrap();
}
