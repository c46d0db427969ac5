use crate::error::AppError;

/// Emails are matched case-insensitively, so they are stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_login_request(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::invalid_field("email", "Email is required"));
    }

    if password.trim().is_empty() {
        return Err(AppError::invalid_field("password", "Password is required"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@State.GOV "), "jane.doe@state.gov");
    }

    #[test]
    fn test_login_validation() {
        assert!(validate_login_request("john@example.com", "password123").is_ok());
        assert!(validate_login_request("", "password123").is_err());
        assert!(validate_login_request("john@example.com", "   ").is_err());
    }
}
