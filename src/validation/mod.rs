pub mod auth;
pub mod bidcycle;
pub mod saved_search;
pub mod share;

use axum::{
    async_trait,
    extract::FromRequest,
    http::Request,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor whose rejections become 400 validation errors in the
/// standard envelope instead of axum's plain-text 4xx responses.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// JSON body extractor that also runs the `validator` rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        value.validate().map_err(|errors| {
            let field_errors = errors.field_errors();
            let mut fields: Vec<_> = field_errors.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));

            match fields.first() {
                Some((field, errs)) => {
                    let message = errs
                        .first()
                        .and_then(|error| error.message.as_ref().map(|m| m.to_string()))
                        .unwrap_or_else(|| format!("Validation failed for field: {}", field));
                    AppError::invalid_field(field.to_string(), message)
                }
                None => AppError::validation("Validation failed"),
            }
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Common validation rules
pub mod rules {
    use validator::ValidationError;

    /// Password strength: at least three of length, lowercase, uppercase,
    /// digit, symbol.
    pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
        let mut score = 0;

        if password.len() >= 8 {
            score += 1;
        }
        if password.chars().any(|c| c.is_lowercase()) {
            score += 1;
        }
        if password.chars().any(|c| c.is_uppercase()) {
            score += 1;
        }
        if password.chars().any(|c| c.is_numeric()) {
            score += 1;
        }
        if password.chars().any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)) {
            score += 1;
        }

        if score < 3 || password.len() < 8 {
            let mut error = ValidationError::new("weak_password");
            error.message = Some("Password is too weak".into());
            return Err(error);
        }

        Ok(())
    }

    /// Letters, digits, `_`, `-` and `.`; must not start with a digit.
    pub fn validate_username_format(username: &str) -> Result<(), ValidationError> {
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            let mut error = ValidationError::new("invalid_username_format");
            error.message = Some("Username contains invalid characters".into());
            return Err(error);
        }

        if username.chars().next().is_some_and(|c| c.is_numeric()) {
            let mut error = ValidationError::new("username_starts_with_number");
            error.message = Some("Username cannot start with a number".into());
            return Err(error);
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn password_strength() {
            assert!(validate_password_strength("Sup3rSecret").is_ok());
            assert!(validate_password_strength("password").is_err());
            assert!(validate_password_strength("Ab1!").is_err());
        }

        #[test]
        fn username_format() {
            assert!(validate_username_format("jane.doe").is_ok());
            assert!(validate_username_format("9lives").is_err());
            assert!(validate_username_format("bad name").is_err());
        }
    }
}
