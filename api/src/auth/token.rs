use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // seller email
    pub exp: usize,
}

/// Outcome of [`TokenService::validate`].
///
/// Bad signatures, unparsable payloads and expired tokens all map to
/// `Invalid`; callers cannot tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidation {
    Valid(String),
    Invalid,
}

impl TokenValidation {
    pub fn subject(self) -> Option<String> {
        match self {
            TokenValidation::Valid(subject) => Some(subject),
            TokenValidation::Invalid => None,
        }
    }
}

/// Issues and validates signed, time-limited bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.signing_secret.as_bytes();

        let mut validation = Validation::new(config.signing_algorithm);
        // No grace window: a token is rejected as soon as `exp` has passed.
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(config.signing_algorithm),
            validation,
            ttl: Duration::minutes(i64::from(config.token_ttl_minutes)),
        }
    }

    pub fn issue(&self, subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let expires_at = (Utc::now() + self.ttl).timestamp();

        let claims = Claims {
            sub: subject.to_owned(),
            exp: expires_at as usize,
        };

        encode(&self.header, &claims, &self.encoding_key)
    }

    pub fn validate(&self, token: &str) -> TokenValidation {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => TokenValidation::Valid(data.claims.sub),
            Err(e) => {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("rejected expired token"),
                    _ => tracing::debug!("rejected malformed token: {}", e),
                }
                TokenValidation::Invalid
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    fn auth_config(secret: &str) -> AuthConfig {
        AuthConfig {
            signing_secret: secret.to_string(),
            signing_algorithm: Algorithm::HS256,
            token_ttl_minutes: 30,
        }
    }

    #[test]
    fn test_issue_then_validate() {
        let tokens = TokenService::new(&auth_config("test-secret"));
        let token = tokens.issue("alice@example.com").unwrap();

        assert_eq!(
            tokens.validate(&token),
            TokenValidation::Valid("alice@example.com".to_string())
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = TokenService::new(&auth_config("test-secret"));
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            exp: (Utc::now() - Duration::seconds(5)).timestamp() as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(tokens.validate(&token), TokenValidation::Invalid);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let ours = TokenService::new(&auth_config("test-secret"));
        let theirs = TokenService::new(&auth_config("another-secret"));
        let token = theirs.issue("alice@example.com").unwrap();

        assert_eq!(ours.validate(&token), TokenValidation::Invalid);
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let ours = TokenService::new(&auth_config("test-secret"));
        let theirs = TokenService::new(&AuthConfig {
            signing_algorithm: Algorithm::HS512,
            ..auth_config("test-secret")
        });
        let token = theirs.issue("alice@example.com").unwrap();

        assert_eq!(ours.validate(&token), TokenValidation::Invalid);
    }

    #[test]
    fn test_garbage_rejected() {
        let tokens = TokenService::new(&auth_config("test-secret"));

        assert_eq!(tokens.validate(""), TokenValidation::Invalid);
        assert_eq!(tokens.validate("not-a-token"), TokenValidation::Invalid);
        assert_eq!(tokens.validate("a.b.c"), TokenValidation::Invalid);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = TokenService::new(&auth_config("test-secret"));
        let token = tokens.issue("alice@example.com").unwrap();
        let other = tokens.issue("mallory@example.com").unwrap();

        // header and signature from one token, payload from another
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(tokens.validate(&forged), TokenValidation::Invalid);
    }

    #[test]
    fn test_missing_exp_rejected() {
        #[derive(Serialize)]
        struct NoExpiry {
            sub: String,
        }

        let tokens = TokenService::new(&auth_config("test-secret"));
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry {
                sub: "alice@example.com".to_string(),
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(tokens.validate(&token), TokenValidation::Invalid);
    }

    #[test]
    fn test_subject_accessor() {
        assert_eq!(
            TokenValidation::Valid("a@b.c".to_string()).subject(),
            Some("a@b.c".to_string())
        );
        assert_eq!(TokenValidation::Invalid.subject(), None);
    }
}
