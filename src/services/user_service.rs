//! Registration, login and profile lookup.

use crate::auth::{PasswordHasher, Principal, TokenService};
use crate::clients::UserClient;
use crate::error::AppError;
use crate::model::{normalize_email, RegisterRequest, Role, User, UserCreate, UserId};
use crate::user_actor::UserError;
use actor_framework::ActorClient;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct UserService {
    users: UserClient,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl UserService {
    pub fn new(users: UserClient, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Creates a `user`-role account. The password is stored only as an Argon2id hash.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let email = normalize_email(&request.email);
        let hasher = self.hasher.clone();
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(AppError::storage)??;

        let params = UserCreate {
            email: email.clone(),
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
            role: Role::User,
        };
        let user = match self.users.create_user(params).await {
            Ok(user) => user,
            Err(UserError::AlreadyExists(_)) => return Err(AppError::EmailExists(email)),
            Err(e) => return Err(e.into()),
        };
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Verifies the password and issues a bearer token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user with email {email}")))?;

        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let stored = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(AppError::storage)?;
        if !verified {
            warn!(user_id = %user.id, "Login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, "User logged in");
        Ok((token, user))
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: UserId) -> Result<User, AppError> {
        self.users
            .fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Resolves a bearer token to the caller's identity.
    pub fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        self.tokens.validate(token)
    }
}
