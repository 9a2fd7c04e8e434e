use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::Credentials;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::Username;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with validated credentials.
    ///
    /// Sequence: existence pre-check, password hash, persist. The store's
    /// uniqueness constraints remain the authoritative race-safety
    /// mechanism; the pre-check only avoids needless hashing work.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Verify login credentials and return the matching account.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller; both yield `InvalidCredentials`.
    ///
    /// # Arguments
    /// * `credentials` - Email and submitted plaintext password
    ///
    /// # Returns
    /// Account entity on success
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email unknown or password mismatch
    /// * `DatabaseError` - Store operation failed
    async fn authenticate(&self, credentials: Credentials) -> Result<Account, AccountError>;

    /// Retrieve account by unique identifier.
    ///
    /// # Arguments
    /// * `id` - Account ID
    ///
    /// # Returns
    /// Account entity
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate: the credential store
/// boundary the domain depends on but does not implement.
///
/// Implementations must enforce uniqueness of `username` and `email`
/// themselves (unique constraint semantics) and report violations as the
/// corresponding `AlreadyExists` errors.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account, letting the store assign id and timestamps.
    ///
    /// # Arguments
    /// * `account` - Account fields to insert (unique keys plus hash)
    ///
    /// # Returns
    /// Full account entity as stored
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Arguments
    /// * `id` - Account ID
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Arguments
    /// * `email` - Email address to search for
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Account>, AccountError>;
}
