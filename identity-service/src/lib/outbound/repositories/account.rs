use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

/// PostgreSQL-backed credential store.
///
/// The `accounts` table carries unique constraints on `username` and
/// `email`; constraint violations on insert are the authoritative conflict
/// signal under concurrent registration.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let query = format!(
            "INSERT INTO accounts (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {SELECT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(account.username.as_str())
            .bind(account.email.as_str())
            .bind(&account.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        if db_err.constraint() == Some("accounts_username_key") {
                            return AccountError::UsernameAlreadyExists(
                                account.username.as_str().to_string(),
                            );
                        }
                        if db_err.constraint() == Some("accounts_email_key") {
                            return AccountError::EmailAlreadyExists(
                                account.email.as_str().to_string(),
                            );
                        }
                    }
                }
                AccountError::DatabaseError(e.to_string())
            })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM accounts WHERE id = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM accounts WHERE username = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM accounts WHERE email = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }
}
