use crate::errors::AppError;
use crate::state::AppState;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(AppError::internal)
}

/// A stored hash that fails to parse counts as a mismatch rather than an
/// error, so login never leaks which accounts have corrupt records.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// First letter of up to two words, uppercased: "Ada Lovelace" -> "AL".
pub fn derive_initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// The session behind a request's `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthSession {
    pub token: Uuid,
    pub user_id: Uuid,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("missing authorization header"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("expected a bearer token"))?;
        let token = Uuid::parse_str(token.trim())
            .map_err(|_| AppError::unauthorized("malformed session token"))?;

        let sessions = state.sessions.lock().await;
        match sessions.get(&token) {
            Some(user_id) => Ok(AuthSession {
                token,
                user_id: *user_id,
            }),
            None => Err(AppError::unauthorized("unknown or expired session")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(derive_initials("Ada Lovelace"), "AL");
        assert_eq!(derive_initials("grace brewster murray hopper"), "GB");
        assert_eq!(derive_initials("Prince"), "P");
        assert_eq!(derive_initials("  "), "");
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "correct horse"));
        assert!(!verify_password(&hash, "wrong horse"));
        assert!(!verify_password("not a phc string", "correct horse"));
    }
}
