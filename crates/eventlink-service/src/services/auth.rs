//! Authentication service
//!
//! Registration, login, token refresh, and logout. Refresh tokens live
//! in Redis and rotate on use; logout revokes the refresh token and
//! blacklists the access token for its remaining lifetime.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use eventlink_cache::RefreshTokenData;
use eventlink_common::auth::{hash_password, validate_password_strength, verify_password};
use eventlink_common::AppError;
use eventlink_core::entities::{User, UserRole};
use eventlink_core::DomainError;

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, LogoutRequest, RefreshTokenRequest,
    RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        let role = match UserRole::parse(&request.role) {
            Some(UserRole::Admin) | None => {
                return Err(ServiceError::validation(
                    "Role must be 'freelancer' or 'recruiter'",
                ));
            }
            Some(role) => role,
        };

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user = User::new(
            self.ctx.generate_id(),
            request.email,
            request.display_name,
            role,
        );

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        self.issue_tokens(&user).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_tokens(&user).await
    }

    /// Rotate tokens using a valid refresh token
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        // The token must verify as a JWT refresh token AND still exist
        // in the store (revocation wins over signature validity)
        self.ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;

        let data = self
            .ctx
            .refresh_token_store()
            .validate(&request.refresh_token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(data.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", data.user_id.to_string()))?;

        self.ctx
            .refresh_token_store()
            .revoke(&request.refresh_token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.issue_tokens(&user).await
    }

    /// Logout: revoke the refresh token and blacklist the presented
    /// access token for its remaining lifetime
    #[instrument(skip(self, access_token, request))]
    pub async fn logout(&self, access_token: &str, request: LogoutRequest) -> ServiceResult<()> {
        if let Some(refresh_token) = &request.refresh_token {
            self.ctx
                .refresh_token_store()
                .revoke(refresh_token)
                .await
                .map_err(|e| ServiceError::internal(e.to_string()))?;
        }

        if let Ok(claims) = self.ctx.jwt_service().validate_access_token(access_token) {
            self.ctx
                .token_blacklist()
                .revoke(access_token, claims.seconds_until_expiry())
                .await
                .map_err(|e| ServiceError::internal(e.to_string()))?;
        }

        info!("User logged out");

        Ok(())
    }

    async fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let session_id = Uuid::new_v4().to_string();
        let data = RefreshTokenData::new(user.id, session_id);
        self.ctx
            .refresh_token_store()
            .store(&pair.refresh_token, &data)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}
