use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Admin;

pub const TOKEN_TTL_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    /// Session version at issue time. Logout bumps the stored version.
    pub ver: i32,
    pub exp: i64,
}

impl Claims {
    pub fn for_admin(admin: &Admin) -> Self {
        Self {
            sub: admin.id,
            ver: admin.session_version,
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::testing::sample_admin;

    const SECRET: &str = "test-jwt-secret-that-is-long-enough";

    #[test]
    fn token_carries_admin_and_session_version() {
        let mut admin = sample_admin();
        admin.session_version = 3;

        let token = encode_token(&Claims::for_admin(&admin), SECRET).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, admin.id);
        assert_eq!(claims.ver, 3);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = encode_token(&Claims::for_admin(&sample_admin()), SECRET).unwrap();
        assert!(decode_token(&token, "some-other-secret-entirely").is_err());
    }
}
