use anyhow::{Context, Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use blaek_common::models::auth::Claims;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Create an access token (JWT) for a user
pub fn create_access_token(
    user_id: &str,
    username: &str,
    jwt_secret: &str,
    ttl_secs: i64,
) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .context("Failed to create access token")
}

/// Validate an access token and return claims
pub fn validate_access_token(token: &str, jwt_secret: &str) -> Result<Claims> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .context("Invalid access token")?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("salainen").unwrap();
        assert_ne!(hash, "salainen");
        assert!(verify_password("salainen", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("salainen", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_token_roundtrip() {
        let token = create_access_token("user-123", "hawking", "sekret", 3600).unwrap();
        let claims = validate_access_token(&token, "sekret").unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.username, "hawking");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = create_access_token("user-123", "hawking", "sekret", 3600).unwrap();
        assert!(validate_access_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s validation leeway
        let token = create_access_token("user-123", "hawking", "sekret", -120).unwrap();
        assert!(validate_access_token(&token, "sekret").is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(validate_access_token("not.a.jwt", "sekret").is_err());
    }
}
