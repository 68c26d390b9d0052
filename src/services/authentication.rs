//! Authentication Use Case
//!
//! Validates credentials, mints the session token, and gathers the data the
//! dashboard needs right after login. Nothing is written anywhere: a failed
//! step simply stops the flow.

use anyhow::anyhow;
use std::sync::Arc;

use crate::auth::{jwt::JwtService, models::TokenPayload, password};
use crate::database::models::{Action, Ngo, User};
use crate::database::{ActionRepository, NgoRepository, UserRepository};
use crate::error::{AppError, AppResult};

/// Everything a successful login hands back to the client
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub ngo: Ngo,
    pub token: String,
    pub actions: Vec<Action>,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    ngos: Arc<dyn NgoRepository>,
    actions: Arc<dyn ActionRepository>,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        ngos: Arc<dyn NgoRepository>,
        actions: Arc<dyn ActionRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            users,
            ngos,
            actions,
            jwt_service,
        }
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Check `email`/`password` and open a session.
    ///
    /// Unknown email and wrong password both fail with
    /// [`AppError::InvalidCredentials`] so callers cannot enumerate accounts.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::info!("Login rejected: credentials did not match");
            return Err(AppError::InvalidCredentials);
        };

        if !password::verify_password(password, &user.password_hash)? {
            tracing::info!("Login rejected: credentials did not match");
            return Err(AppError::InvalidCredentials);
        }

        let (ngo, actions) = self.load_organization(&user).await?;

        let token = self.jwt_service.issue(&TokenPayload {
            sub: user.id,
            ngo_id: ngo.id,
        })?;

        tracing::info!("User {} logged in for ngo {}", user.id, ngo.id);

        Ok(LoginOutcome {
            user,
            ngo,
            token,
            actions,
        })
    }

    /// Reload the session data for an already verified token payload
    pub async fn current_session(
        &self,
        payload: &TokenPayload,
    ) -> AppResult<(User, Ngo, Vec<Action>)> {
        let Some(user) = self.users.find_by_id(payload.sub).await? else {
            tracing::warn!("Token references unknown user {}", payload.sub);
            return Err(AppError::InvalidToken);
        };

        let (ngo, actions) = self.load_organization(&user).await?;
        Ok((user, ngo, actions))
    }

    async fn load_organization(&self, user: &User) -> AppResult<(Ngo, Vec<Action>)> {
        let ngo = self
            .ngos
            .find_by_id(user.ngo_id)
            .await?
            .ok_or_else(|| anyhow!("User {} references missing ngo {}", user.id, user.ngo_id))?;

        let actions = self.actions.find_by_ngo_id(ngo.id).await?;
        Ok((ngo, actions))
    }
}
