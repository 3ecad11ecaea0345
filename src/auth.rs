use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::AppConfig, models::User};

/// Sessions are valid for a fixed single day from issuance.
const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Claims
///
/// The payload structure signed into every session token. The identity claims
/// mirror what `POST /auth/login` returns in the profile, so the client can
/// treat the token as an opaque credential while the server re-derives the
/// identity from the signature alone.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the UUID of the user, the primary key into the `users` table.
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    /// Issued At (iat): timestamp when the token was signed.
    pub iat: usize,
    /// Expiration Time (exp): timestamp after which the token must not be accepted.
    pub exp: usize,
}

/// issue_token
///
/// Signs a fresh session token for the given account. The expiry is fixed at
/// one day. A token, once issued, is never mutated, only replaced by a new
/// login or discarded by logout/expiry.
pub fn issue_token(user: &User, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.clone(),
        iat: now,
        exp: now + TOKEN_TTL_SECS as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// hash_password
///
/// Hashes a registration password with Argon2 under a fresh random salt,
/// returning the PHC string stored in the `users` table.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// verify_password
///
/// Checks a login password against the stored PHC string. An unparseable hash
/// counts as a mismatch rather than an error, so login failures stay on the
/// single generic path.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// AuthUser Extractor Result
///
/// The resolved identity of an authenticated request, taken from the validated
/// token claims. Handlers use this struct to retrieve the user's ID and verify
/// permissions.
///
/// The extractor validates the signature and expiry only; it does not hit the
/// database. `GET /auth/me` performs the store lookup itself, which is the one
/// path that can answer "authenticated, but the account no longer exists".
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    /// The user's role, 'user' or 'admin'. Used for Role-Based Access Control.
    pub role: String,
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any authenticated handler. This cleanly separates
/// authentication (extractor) from business logic (the handler).
///
/// The process:
/// 1. Dependency Resolution: AppConfig (for the signing secret) from the state.
/// 2. Token Extraction: standard Bearer token parsing.
/// 3. Token Validation: HS256 decode with mandatory expiry validation.
///
/// Rejection: StatusCode::UNAUTHORIZED (401) on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Dependency Resolution
        let config = AppConfig::from_ref(state);

        // 2. Token Extraction
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        // 3. Decode and Validate the Token
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        // Expired tokens are the common failure mode for a valid-but-old session.
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser {
            id: token_data.claims.sub,
            email: token_data.claims.email,
            role: token_data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "rider@bike-unity.ru".to_string(),
            name: "Rider".to_string(),
            role: "user".to_string(),
            password_hash: String::new(),
        }
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("secret1").expect("hashing failed");
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
    }

    #[test]
    fn corrupt_hash_is_a_mismatch_not_a_panic() {
        assert!(!verify_password("secret1", "not-a-phc-string"));
    }

    #[test]
    fn token_embeds_identity_claims() {
        let user = sample_user();
        let token = issue_token(&user, "test-secret").expect("issue failed");

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test-secret".as_bytes()),
            &Validation::default(),
        )
        .expect("decode failed");

        assert_eq!(decoded.claims.sub, user.id);
        assert_eq!(decoded.claims.email, user.email);
        assert_eq!(decoded.claims.role, "user");
        assert_eq!(
            decoded.claims.exp - decoded.claims.iat,
            TOKEN_TTL_SECS as usize
        );
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let token = issue_token(&sample_user(), "test-secret").expect("issue failed");
        let err = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("other-secret".as_bytes()),
            &Validation::default(),
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }
}
