//! Bearer-token identity verification
//!
//! RS256 verification only; issuing tokens is someone else's job. The public
//! key is loaded once at startup and injected here, never read ad hoc per
//! request.

use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Payload this service expects inside a verified token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: usize,
}

/// Verifies RS256 bearer tokens against a fixed public key.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Build a verifier from a PEM-encoded RSA public key.
    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, jsonwebtoken::errors::Error> {
        Ok(Self {
            decoding_key: DecodingKey::from_rsa_pem(pem)?,
            validation: Validation::new(Algorithm::RS256),
        })
    }

    /// Decode and verify a token, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
    }
}

/// Pull the bearer token out of the Authorization header.
pub fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    req.headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))
}

/// Verify the request's bearer token and return the caller's claims.
pub fn authenticate(req: &HttpRequest, verifier: &JwtVerifier) -> Result<Claims, AppError> {
    verifier.verify(bearer_token(req)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    const TEST_PUBLIC_KEY: &[u8] = b"-----BEGIN PUBLIC KEY-----
MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAvB8aXUJEwGDS6s9ynWvi
MZwyOp9V9ZP6gNW7HIBZTa9+uThr1k+JOdi9+2Gf2PRmUif9ifADuftMc9xWosDZ
jSqDe7C9oRwdNfN6sftwsiS9Wxv6wrrFvawZX7llTp/VhjjOtnhjV6gmsKzyHA7o
iv6vKdGcpyCu4gVZALN40tLXNbRVEmiVlIhtDo1QBbzHHLye7p1H1B+slKNjiQSW
qZ0B2eoPrgyDAWKaC2LKCklPuj0siggtPMAxMsUXyIODEZebBpeb5OUhmHo7v5PZ
n3Dqu1zo6AgdXHAG+qrKbe9u1JuZHYEOzfxH0avkIDD65/7PgtvvGXdRGpLgJyzd
7QIDAQAB
-----END PUBLIC KEY-----
";

    #[test]
    fn test_bearer_token_extraction() {
        let req = TestRequest::default()
            .insert_header(("authorization", "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_missing() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            bearer_token(&req),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let req = TestRequest::default()
            .insert_header(("authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(matches!(
            bearer_token(&req),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let verifier = JwtVerifier::from_rsa_pem(TEST_PUBLIC_KEY).unwrap();
        assert!(matches!(
            verifier.verify("not-a-token"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
