use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::ActorRole;

/// JWT Claims - data stored in the token
///
/// Tokens are issued by the platform's identity service; this core only
/// verifies them. The role was checked at issuance, so resolvers can trust
/// it the same way they trust the subject.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,     // Subject (user_id as string)
    pub user_id: Uuid,   // User UUID
    pub role: ActorRole, // practitioner, physician, or admin
    pub exp: i64,        // Expiration timestamp
    pub iat: i64,        // Issued at timestamp
    pub iss: String,     // Issuer
}

/// JWT Service - verifies tokens minted by the identity service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with the shared secret and expected issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Verify and decode a bearer token
    ///
    /// Returns claims if the token is valid, unexpired, and from our issuer
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }

    /// Mint a token the way the identity service does.
    ///
    /// Exists for the test harness and local development; production tokens
    /// come from the identity service with the same shape.
    pub fn create_token(&self, user_id: Uuid, role: ActorRole) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(24);

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_verify_token() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        let user_id = Uuid::new_v4();

        let token = service.create_token(user_id, ActorRole::Physician).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, ActorRole::Physician);
        assert_eq!(claims.iss, "test_issuer");
    }

    #[test]
    fn rejects_wrong_secret() {
        let issuing = JwtService::new("secret_a", "issuer".to_string());
        let verifying = JwtService::new("secret_b", "issuer".to_string());

        let token = issuing
            .create_token(Uuid::new_v4(), ActorRole::Admin)
            .unwrap();
        assert!(verifying.verify_token(&token).is_err());
    }

    #[test]
    fn rejects_wrong_issuer() {
        let issuing = JwtService::new("secret", "issuer_a".to_string());
        let verifying = JwtService::new("secret", "issuer_b".to_string());

        let token = issuing
            .create_token(Uuid::new_v4(), ActorRole::Practitioner)
            .unwrap();
        assert!(verifying.verify_token(&token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let service = JwtService::new("secret", "issuer".to_string());
        assert!(service.verify_token("not-a-token").is_err());
    }
}
