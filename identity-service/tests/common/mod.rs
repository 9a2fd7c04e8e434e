use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use identity_service::account::errors::AccountError;
use identity_service::account::models::Account;
use identity_service::account::models::AccountId;
use identity_service::account::models::EmailAddress;
use identity_service::account::models::NewAccount;
use identity_service::account::models::Username;
use identity_service::account::ports::AccountRepository;
use uuid::Uuid;

/// In-memory credential store with unique-constraint semantics.
///
/// Stands in for PostgreSQL in flow tests: uniqueness of username and
/// email is enforced on insert, and id/timestamps are store-assigned,
/// matching the contract the domain relies on.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_by_email(&self, email: &str) -> usize {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.email.as_str() == email)
            .count()
    }

    pub fn count_by_username(&self, username: &str) -> usize {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.username.as_str() == username)
            .count()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts
            .iter()
            .any(|a| a.username == account.username)
        {
            return Err(AccountError::UsernameAlreadyExists(
                account.username.to_string(),
            ));
        }
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists(account.email.to_string()));
        }

        let now = Utc::now();
        let stored = Account {
            id: AccountId(Uuid::new_v4()),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            created_at: now,
            updated_at: now,
        };
        accounts.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == *id)
            .cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == *username)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == *email)
            .cloned())
    }
}
