// src/services/auth_service.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{PasswordResetTokenRepository, UserRepository},
    models::auth::{
        AuthResponse, Claims, LoginUserPayload, PasswordResetToken, RegisterUserPayload,
        User, UserRole,
    },
};

// Validade dos artefatos de credencial
const ACCESS_TOKEN_DAYS: i64 = 7;
const RESET_TOKEN_MINUTES: i64 = 60;

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    token_repo: Arc<dyn PasswordResetTokenRepository>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn PasswordResetTokenRepository>,
        jwt_secret: String,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            jwt_secret,
        }
    }

    // Hashing é caro: roda em thread separada para não travar o runtime.
    async fn hash_password(password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    pub async fn register(&self, payload: RegisterUserPayload) -> Result<User, AppError> {
        payload.validate()?;

        if self.user_repo.find_by_email(&payload.email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        let password_hash = Self::hash_password(&payload.password).await?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: payload.email,
            password_hash,
            role: payload.role.unwrap_or(UserRole::Operator),
            created_at: now,
            updated_at: now,
        };
        self.user_repo.insert(&user).await?;

        tracing::info!("👤 Usuário '{}' registrado", user.email);
        Ok(user)
    }

    pub async fn login(&self, payload: LoginUserPayload) -> Result<AuthResponse, AppError> {
        payload.validate()?;

        // E-mail desconhecido e senha errada produzem o mesmo erro,
        // sem revelar qual dos dois falhou.
        let user = self
            .user_repo
            .find_by_email(&payload.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = payload.password;
        let password_hash = user.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok(AuthResponse { token })
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(ACCESS_TOKEN_DAYS);

        let claims = Claims {
            sub: user.id,
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    /// Emite um token de redefinição de senha, de uso único e com
    /// validade de uma hora. O envio por e-mail fica a cargo do
    /// colaborador externo; aqui só se emite e armazena.
    /// E-mail desconhecido retorna `None` sem erro, para não permitir
    /// enumeração de contas.
    pub async fn request_password_reset(
        &self,
        email: &str,
    ) -> Result<Option<String>, AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let token = PasswordResetToken {
            id: Uuid::new_v4(),
            user_id: user.id,
            token: Uuid::new_v4().to_string(),
            expires_at: now + chrono::Duration::minutes(RESET_TOKEN_MINUTES),
            used: false,
            created_at: now,
        };
        self.token_repo.insert(&token).await?;

        tracing::info!("🔑 Token de redefinição emitido para '{}'", user.email);
        Ok(Some(token.token))
    }

    /// Valida e consome o token: precisa existir, não ter sido usado
    /// e não ter expirado. No sucesso grava o novo hash e marca o
    /// token como usado.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let record = self
            .token_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if record.used {
            return Err(AppError::InvalidToken);
        }
        if record.expires_at < Utc::now() {
            return Err(AppError::TokenExpired);
        }

        let password_hash = Self::hash_password(new_password).await?;
        self.user_repo
            .update_password(record.user_id, &password_hash)
            .await?;
        self.token_repo.mark_used(record.id).await?;

        tracing::info!("🔒 Senha redefinida para o usuário {}", record.user_id);
        Ok(())
    }
}
