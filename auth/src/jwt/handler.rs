use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Token issuer and verifier.
///
/// Signs compact, URL-safe, self-contained tokens with a process-wide
/// symmetric secret using HS256 (HMAC with SHA-256). The secret is loaded
/// once at startup; rotating it invalidates all outstanding tokens.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime_hours: i64,
}

impl JwtHandler {
    /// Create a new handler with a secret key and token lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `lifetime_hours` - Lifetime of issued tokens in hours
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `EmptySecret` - The secret is empty; callers must treat this as fatal
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], lifetime_hours: i64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime_hours,
        })
    }

    /// Issue a signed token for a subject.
    ///
    /// Claims are `{sub, iat, exp}` with `exp = now + lifetime`.
    ///
    /// # Arguments
    /// * `subject` - Account identifier the token asserts
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.lifetime_hours);
        self.encode(&claims)
    }

    /// Encode claims into a signed token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a presented token and extract its claims.
    ///
    /// Recomputes the signature over the claims and checks expiry with no
    /// leeway. Any parse failure (wrong field count, bad encoding,
    /// non-numeric timestamp) is `Malformed`.
    ///
    /// # Arguments
    /// * `token` - Compact token string to verify
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Expired` - The `exp` claim has passed
    /// * `BadSignature` - Signature does not match the claims
    /// * `Malformed` - Token structure or encoding is invalid
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    ErrorKind::InvalidSignature => JwtError::BadSignature,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        // The library's expiry check is exclusive; a token is invalid the
        // instant `exp` passes, so `exp == now` must also be rejected.
        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
