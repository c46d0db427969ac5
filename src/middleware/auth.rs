use crate::AppState;
use crate::config::AuthConfig;
use crate::db::models::AuthUser;
use crate::error::{AppError, AppResult};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{Request, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid, // user id
    pub email: String,
    pub username: String,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

/// The authenticated caller, inserted into request extensions by
/// [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUserInfo {
    pub user: AuthUser,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUserInfo
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUserInfo>()
            .cloned()
            .ok_or_else(|| AppError::auth("Authentication credentials were not provided"))
    }
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    expires_in: u64,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expires_in: config.access_token_expires_in,
        }
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn generate_access_token(&self, user: &AuthUser) -> AppResult<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::internal(format!("System clock error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            exp: now + self.expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a valid bearer token before they reach a handler.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::auth("Authentication credentials were not provided"))?;

    let claims = state
        .jwt
        .verify_token(token)
        .map_err(|_| AppError::auth("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthUserInfo {
        user: AuthUser {
            id: claims.sub,
            email: claims.email,
            username: claims.username,
        },
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtService {
        JwtService::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            access_token_expires_in: 3600,
            bcrypt_cost: 4,
        })
    }

    fn user() -> AuthUser {
        AuthUser {
            id: uuid::Uuid::new_v4(),
            email: "jane@state.gov".to_string(),
            username: "jane".to_string(),
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let jwt = service("secret");
        let user = user();
        let token = jwt.generate_access_token(&user).unwrap();
        let claims = jwt.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "jane@state.gov");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = service("one").generate_access_token(&user()).unwrap();
        assert!(service("two").verify_token(&token).is_err());
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
    }
}
