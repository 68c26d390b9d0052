//! JWT Token Service
//!
//! Issues and verifies the signed, time-limited credentials handed out on login.
//! Tokens are stateless: nothing is stored server-side, so a token dies only by
//! expiry or by rotating the signing secret.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::auth::models::TokenPayload;

/// Issuer stamped into every token and required on verification
pub const TOKEN_ISSUER: &str = "ngo-transparency-server";

/// Tokens live for 7 days
pub const TOKEN_TTL_DAYS: i64 = 7;

/// JWT Claims: the credential payload plus token metadata
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(flatten)]
    pub payload: TokenPayload,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    #[error("failed to encode token: {0}")]
    Encode(jsonwebtoken::errors::Error),
}

/// JWT Service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    /// Create a new JWT service with the provided secret
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            ttl: Duration::days(TOKEN_TTL_DAYS),
        }
    }

    /// Token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Sign `payload` into a token expiring 7 days from now
    pub fn issue(&self, payload: &TokenPayload) -> Result<String, TokenError> {
        self.issue_at(payload, Utc::now())
    }

    /// Sign `payload` as if issued at `now`
    pub fn issue_at(
        &self,
        payload: &TokenPayload,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            payload: payload.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)
    }

    /// Validate signature, issuer and expiry, returning the full claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e),
            })
    }

    /// Validate a token and return the payload it carries
    pub fn verify(&self, token: &str) -> Result<TokenPayload, TokenError> {
        self.decode_claims(token).map(|claims| claims.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn payload() -> TokenPayload {
        TokenPayload {
            sub: Uuid::new_v4(),
            ngo_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_jwt_roundtrip() {
        let jwt_service = JwtService::new("test_secret");
        let payload = payload();

        let token = jwt_service.issue(&payload).unwrap();
        let verified = jwt_service.verify(&token).unwrap();

        assert_eq!(verified, payload);
    }

    #[test]
    fn test_claims_metadata() {
        let jwt_service = JwtService::new("test_secret");
        let token = jwt_service.issue(&payload()).unwrap();

        let claims = jwt_service.decode_claims(&token).unwrap();

        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
        assert_eq!(jwt_service.expires_in(), 604_800);
    }

    #[test]
    fn test_expired_token() {
        let jwt_service = JwtService::new("test_secret");
        // Issued 8 days ago, so it lapsed yesterday
        let issued = Utc::now() - Duration::days(8);
        let token = jwt_service.issue_at(&payload(), issued).unwrap();

        assert!(matches!(jwt_service.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_token_near_end_of_life_still_valid() {
        let jwt_service = JwtService::new("test_secret");
        let issued = Utc::now() - Duration::days(7) + Duration::minutes(5);
        let token = jwt_service.issue_at(&payload(), issued).unwrap();

        assert!(jwt_service.verify(&token).is_ok());
    }

    #[test]
    fn test_bad_signature() {
        let token = JwtService::new("secret-A").issue(&payload()).unwrap();

        let result = JwtService::new("secret-B").verify(&token);

        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_malformed_token() {
        let jwt_service = JwtService::new("test_secret");

        assert!(matches!(jwt_service.verify("not-a-jwt"), Err(TokenError::Invalid(_))));
        assert!(matches!(jwt_service.verify(""), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let secret = "test_secret";
        let claims = Claims {
            payload: payload(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iss: "someone-else".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let result = JwtService::new(secret).verify(&token);

        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }
}
