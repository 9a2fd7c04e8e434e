use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token claims: a time-boxed assertion of an account identity.
///
/// Every issued token carries exactly these fields; issuance derives the
/// timestamps itself, they are never caller-controlled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject with an expiration relative to now.
    ///
    /// # Arguments
    /// * `subject` - Unique account identifier
    /// * `lifetime_hours` - Hours until the token expires
    ///
    /// # Returns
    /// Claims with sub, iat, and exp set
    pub fn for_subject(subject: impl ToString, lifetime_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(lifetime_hours);

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the claims are expired at the given instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
