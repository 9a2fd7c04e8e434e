use std::sync::Arc;

use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::Credentials;
use crate::account::models::NewAccount;
use crate::account::models::RegisterAccountCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Registrar and authenticator over an injected credential store. Holds no
/// mutable state; every operation is independently invocable.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: auth::PasswordHasher,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new account service with an injected repository.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        // Pre-check before hashing; the store's unique constraints stay
        // authoritative under concurrent registration.
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AccountError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(command.password.as_str())?;

        self.repository
            .create(NewAccount {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<Account, AccountError> {
        let account = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&credentials.password, &account.password_hash)
        {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;
    use uuid::Uuid;

    use super::*;
    use crate::account::models::EmailAddress;
    use crate::account::models::Password;
    use crate::account::models::Username;

    // Define mocks in the test module using mockall
    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
        }
    }

    fn stored(account: NewAccount) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId(Uuid::new_v4()),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    fn command(username: &str, email: &str, password: &str) -> RegisterAccountCommand {
        RegisterAccountCommand::new(
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|account| {
                account.username.as_str() == "alice"
                    && account.email.as_str() == "alice@x.com"
                    && account.password_hash.starts_with("$argon2")
                    && account.password_hash != "secret1"
            })
            .times(1)
            .returning(|account| Ok(stored(account)));

        let service = AccountService::new(Arc::new(repository));

        let account = service
            .register(command("alice", "alice@x.com", "secret1"))
            .await
            .expect("registration failed");

        assert_eq!(account.username.as_str(), "alice");
        assert_eq!(account.email.as_str(), "alice@x.com");
        // Plaintext never stored
        assert!(account.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_precheck() {
        let mut repository = MockTestAccountRepository::new();

        repository.expect_find_by_username().times(1).returning(|_| {
            Ok(Some(stored(NewAccount {
                username: Username::new("alice".to_string()).unwrap(),
                email: EmailAddress::new("other@x.com".to_string()).unwrap(),
                password_hash: "$argon2id$existing".to_string(),
            })))
        });
        // No hashing work, no insert attempt
        repository.expect_create().times(0);

        let service = AccountService::new(Arc::new(repository));

        let result = service
            .register(command("alice", "alice@x.com", "secret1"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_precheck() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_find_by_email().times(1).returning(|_| {
            Ok(Some(stored(NewAccount {
                username: Username::new("someone".to_string()).unwrap(),
                email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
                password_hash: "$argon2id$existing".to_string(),
            })))
        });
        repository.expect_create().times(0);

        let service = AccountService::new(Arc::new(repository));

        let result = service
            .register(command("alice2", "alice@x.com", "secret1"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_register_conflict_reported_by_store() {
        // Pre-check races past a concurrent insert; the constraint wins.
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_create().times(1).returning(|account| {
            Err(AccountError::EmailAlreadyExists(account.email.to_string()))
        });

        let service = AccountService::new(Arc::new(repository));

        let result = service
            .register(command("alice", "alice@x.com", "secret1"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut repository = MockTestAccountRepository::new();

        let password_hash = auth::PasswordHasher::new().hash("secret1").unwrap();
        repository.expect_find_by_email().times(1).returning(move |_| {
            Ok(Some(stored(NewAccount {
                username: Username::new("alice".to_string()).unwrap(),
                email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
                password_hash: password_hash.clone(),
            })))
        });

        let service = AccountService::new(Arc::new(repository));

        let account = service
            .authenticate(Credentials {
                email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
                password: "secret1".to_string(),
            })
            .await
            .expect("authentication failed");

        assert_eq!(account.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut repository = MockTestAccountRepository::new();

        let password_hash = auth::PasswordHasher::new().hash("secret1").unwrap();
        repository.expect_find_by_email().times(1).returning(move |_| {
            Ok(Some(stored(NewAccount {
                username: Username::new("alice".to_string()).unwrap(),
                email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
                password_hash: password_hash.clone(),
            })))
        });

        let service = AccountService::new(Arc::new(repository));

        let result = service
            .authenticate(Credentials {
                email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
                password: "wrong".to_string(),
            })
            .await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository));

        // Same error as a wrong password: existence is not disclosed
        let result = service
            .authenticate(Credentials {
                email: EmailAddress::new("ghost@x.com".to_string()).unwrap(),
                password: "whatever".to_string(),
            })
            .await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_get_account_success() {
        let mut repository = MockTestAccountRepository::new();

        let account_id = AccountId(Uuid::new_v4());
        let mut account = stored(NewAccount {
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
        });
        account.id = account_id;

        let returned = account.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = AccountService::new(Arc::new(repository));

        let found = service.get_account(&account_id).await.unwrap();
        assert_eq!(found.id, account_id);
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository));

        let result = service.get_account(&AccountId(Uuid::new_v4())).await;
        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }
}
