//! Session cookie handling
//!
//! The session token travels in a cookie readable by client-side script so
//! that the front end can forward it to the backend itself.

use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "sb-access-token";

/// Cookie attributes configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Mark cookies `Secure`
    pub secure: bool,
}

impl CookieConfig {
    /// Create a new CookieConfig from environment variables
    ///
    /// # Environment Variables
    /// - `APP_ENV`: Deployment environment; `development` disables `Secure` (default: "production")
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "production".to_string());

        Ok(CookieConfig {
            secure: environment != "development",
        })
    }
}

/// Cookie carrying `token`, living for `max_age_seconds`
pub fn session_cookie(token: String, max_age_seconds: i64, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .secure(config.secure)
        .http_only(false)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(max_age_seconds))
        .build()
}

/// Empty cookie instructing the client to drop the session immediately
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(Duration::seconds(-1))
        .build()
}

/// Session token from the request cookies, if a non-empty one is present
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("token".to_string(), 3600, &CookieConfig { secure: true });
        let header = cookie.to_string();

        assert!(header.starts_with("sb-access-token=token"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("SameSite=Strict"));
        assert!(header.contains("Secure"));
        assert!(header.contains("Max-Age=3600"));
        assert!(!header.contains("HttpOnly"));
    }

    #[test]
    fn test_session_cookie_not_secure_in_development() {
        let cookie = session_cookie("token".to_string(), 60, &CookieConfig { secure: false });
        assert!(!cookie.to_string().contains("Secure"));
    }

    #[test]
    fn test_cleared_session_cookie() {
        let header = cleared_session_cookie().to_string();

        assert!(header.starts_with("sb-access-token=;"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=-1"));
    }

    #[test]
    fn test_session_token_from_jar() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, "abc"));
        assert_eq!(session_token(&jar), Some("abc".to_string()));

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, ""));
        assert_eq!(session_token(&jar), None);

        assert_eq!(session_token(&CookieJar::new()), None);
    }
}
