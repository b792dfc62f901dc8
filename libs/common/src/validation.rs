//! Input validation utilities

/// Validate a verifier access token before forwarding it
pub fn validate_access_token(token: &str) -> Result<(), String> {
    if token.trim().is_empty() {
        return Err("Access token is required".to_string());
    }

    if token.len() > 8192 {
        return Err("Access token must be at most 8192 characters long".to_string());
    }

    if token.chars().any(char::is_whitespace) {
        return Err("Access token must not contain whitespace".to_string());
    }

    Ok(())
}

/// Validate a to-do item name
pub fn validate_todo_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Todo name is required".to_string());
    }

    if name.chars().count() > 200 {
        return Err("Todo name must be at most 200 characters long".to_string());
    }

    Ok(())
}
