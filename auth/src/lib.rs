//! Authentication utilities library
//!
//! Provides the credential primitives used by the identity service:
//! - Password hashing and verification (Argon2id, PHC string format)
//! - Signed bearer tokens (HS256 JWT) with issue and verify operations
//!
//! The service defines its own domain traits and adapts these
//! implementations, keeping crypto details out of the domain layer.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::JwtHandler;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", 24).unwrap();
//! let token = handler.issue("account123").unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, "account123");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
