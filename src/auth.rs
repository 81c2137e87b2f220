//! # Authentication
//!
//! Password hashing and bearer tokens for the user service.
//!
//! - [`PasswordHasher`]: Argon2id with a random salt per password, stored as a PHC string.
//! - [`TokenService`]: HS256 JWTs carrying the user's id, email and admin flag.
//!
//! Token validation never says *why* a token was rejected: expired, malformed and
//! wrongly-signed tokens all become [`AppError::Unauthorized`].

use crate::error::AppError;
use crate::model::{User, UserId};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("memory_kib", &self.params.m_cost())
            .finish()
    }
}

impl PasswordHasher {
    pub fn new(memory_kib: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, Params::DEFAULT_T_COST, Params::DEFAULT_P_COST, None)
            .map_err(|e| AppError::InvalidInput(format!("argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes `password`, rejecting anything shorter than [`MIN_PASSWORD_LEN`].
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::storage(format!("password hashing failed: {e}")))
    }

    /// True when `password` matches the stored PHC string. A malformed hash never matches.
    pub fn verify(&self, password: &str, phc: &str) -> bool {
        match PasswordHash::new(phc) {
            Ok(parsed) => self
                .argon2()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                debug!(error = %e, "stored password hash is not a PHC string");
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub email: String,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// The caller identity extracted from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
    pub is_admin: bool,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            is_admin: claims.is_admin,
        }
    }
}

pub fn require_admin(principal: &Principal) -> Result<(), AppError> {
    if principal.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService").field("ttl", &self.ttl).finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl: chrono::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            is_admin: user.is_admin(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::storage(format!("token signing failed: {e}")))
    }

    pub fn validate(&self, token: &str) -> Result<Principal, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims.into())
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AppError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn user(role: Role) -> User {
        User {
            id: UserId(7),
            email: "ada@example.com".into(),
            password_hash: String::new(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(64).unwrap();
        let phc = hasher.hash("correct horse").unwrap();
        assert!(phc.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &phc));
        assert!(!hasher.verify("wrong horse", &phc));
        assert!(!hasher.verify("correct horse", "not-a-hash"));
    }

    #[test]
    fn test_salt_is_random() {
        let hasher = PasswordHasher::new(64).unwrap();
        assert_ne!(hasher.hash("password1").unwrap(), hasher.hash("password1").unwrap());
    }

    #[test]
    fn test_short_password_rejected() {
        let hasher = PasswordHasher::new(64).unwrap();
        assert!(matches!(hasher.hash("short"), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_token_round_trip() {
        let tokens = TokenService::new("secret", chrono::Duration::hours(1));
        let token = tokens.issue(&user(Role::Admin)).unwrap();
        let principal = tokens.validate(&token).unwrap();
        assert_eq!(principal.user_id, UserId(7));
        assert_eq!(principal.email, "ada@example.com");
        assert!(principal.is_admin);
    }

    #[test]
    fn test_expired_tampered_and_foreign_tokens_are_unauthorized() {
        let expired = TokenService::new("secret", chrono::Duration::hours(-1))
            .issue(&user(Role::User))
            .unwrap();
        let tokens = TokenService::new("secret", chrono::Duration::hours(1));
        assert!(matches!(tokens.validate(&expired), Err(AppError::Unauthorized)));

        let foreign = TokenService::new("other", chrono::Duration::hours(1))
            .issue(&user(Role::User))
            .unwrap();
        assert!(matches!(tokens.validate(&foreign), Err(AppError::Unauthorized)));

        let mut tampered = tokens.issue(&user(Role::User)).unwrap();
        tampered.push('x');
        assert!(matches!(tokens.validate(&tampered), Err(AppError::Unauthorized)));

        assert!(matches!(tokens.validate("garbage"), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_require_admin() {
        let tokens = TokenService::new("secret", chrono::Duration::hours(1));
        let plain = tokens.validate(&tokens.issue(&user(Role::User)).unwrap()).unwrap();
        assert!(matches!(require_admin(&plain), Err(AppError::Forbidden)));

        let admin = tokens.validate(&tokens.issue(&user(Role::Admin)).unwrap()).unwrap();
        assert!(require_admin(&admin).is_ok());
    }
}
