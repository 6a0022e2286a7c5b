use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use magshelf_core::AccountProfile;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::AuthError;

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// Identity carried by the login token. `sub` is the account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub exp: usize,
}

pub fn generate_auth_token(
    profile: &AccountProfile,
    config: &JwtConfig,
) -> Result<String, AuthError> {
    let delta = chrono::Duration::try_seconds(config.token_ttl_in_seconds).ok_or(
        AuthError::UnexpectedError("Failed to create auth token duration".to_owned()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(AuthError::UnexpectedError(
            "Duration out of range".to_owned(),
        ))?
        .timestamp();

    let exp: usize = exp
        .try_into()
        .map_err(|_| AuthError::UnexpectedError("Failed to cast i64 to usize".to_owned()))?;

    let claims = Claims {
        sub: profile.id.to_string(),
        email: profile.email.clone(),
        name: profile.name.clone(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.as_bytes()),
    )
    .map_err(AuthError::TokenError)
}
