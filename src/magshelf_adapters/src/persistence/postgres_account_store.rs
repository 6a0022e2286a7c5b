use std::collections::HashMap;

use chrono::{DateTime, Utc};
use magshelf_core::{
    Account, AccountId, AccountParts, AccountProfile, AccountStore, AccountStoreError,
    CodeGrant, DisplayName, Email, OneTimeCode, PasswordHash,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ACCOUNT_COLUMNS: &str = "id, email, name, password_hash, google_id, is_verified, \
                               otp, otp_expires_at, created_at, updated_at";

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: Option<String>,
    google_id: Option<String>,
    is_verified: bool,
    otp: Option<String>,
    otp_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let unexpected = |e: &dyn std::fmt::Display| AccountStoreError::UnexpectedError(e.to_string());

        let code = match (row.otp, row.otp_expires_at) {
            (Some(otp), Some(expires_at)) => Some(CodeGrant::from_parts(
                OneTimeCode::parse(otp).map_err(|e| unexpected(&e))?,
                expires_at,
            )),
            _ => None,
        };

        Ok(Account::from_parts(AccountParts {
            id: AccountId::from_uuid(row.id),
            email: Email::try_from(Secret::new(row.email)).map_err(|e| unexpected(&e))?,
            name: DisplayName::parse(row.name).map_err(|e| unexpected(&e))?,
            password_hash: row.password_hash.map(|hash| PasswordHash::new(Secret::new(hash))),
            google_id: row.google_id,
            is_verified: row.is_verified,
            code,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

fn map_write_error(e: sqlx::Error) -> AccountStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AccountStoreError::AccountAlreadyExists;
        }
    }
    AccountStoreError::UnexpectedError(e.to_string())
}

impl PostgresAccountStore {
    async fn fetch_one_where(
        &self,
        predicate: &str,
        value: impl for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    ) -> Result<Account, AccountStoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {predicate} = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(AccountStoreError::AccountNotFound)?.try_into()
    }
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.fetch_one_where("email", email.as_ref().expose_secret().clone())
            .await
    }

    #[tracing::instrument(name = "Retrieving account by google id from PostgreSQL", skip_all)]
    async fn find_by_google_id(&self, google_id: &str) -> Result<Account, AccountStoreError> {
        self.fetch_one_where("google_id", google_id.to_owned()).await
    }

    #[tracing::instrument(name = "Retrieving account by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError> {
        self.fetch_one_where("id", *id.as_uuid()).await
    }

    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn create(&self, account: Account) -> Result<(), AccountStoreError> {
        let code = account.code();
        sqlx::query(
            r#"
                INSERT INTO accounts (id, email, name, password_hash, google_id, is_verified,
                                      otp, otp_expires_at, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.email().as_ref().expose_secret())
        .bind(account.name().as_str())
        .bind(account.password_hash().map(|h| h.as_ref().expose_secret().clone()))
        .bind(account.google_id())
        .bind(account.is_verified())
        .bind(code.map(|grant| grant.code().as_str().to_owned()))
        .bind(code.map(CodeGrant::expires_at))
        .bind(account.created_at())
        .bind(account.updated_at())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Saving account to PostgreSQL", skip_all)]
    async fn save(&self, account: &Account) -> Result<(), AccountStoreError> {
        let code = account.code();
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET email = $2, name = $3, password_hash = $4, google_id = $5,
                    is_verified = $6, otp = $7, otp_expires_at = $8, updated_at = $9
                WHERE id = $1
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.email().as_ref().expose_secret())
        .bind(account.name().as_str())
        .bind(account.password_hash().map(|h| h.as_ref().expose_secret().clone()))
        .bind(account.google_id())
        .bind(account.is_verified())
        .bind(code.map(|grant| grant.code().as_str().to_owned()))
        .bind(code.map(CodeGrant::expires_at))
        .bind(account.updated_at())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Loading account profiles from PostgreSQL", skip_all)]
    async fn profiles(
        &self,
        ids: &[AccountId],
    ) -> Result<HashMap<AccountId, AccountProfile>, AccountStoreError> {
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<(Uuid, String, String)> =
            sqlx::query_as("SELECT id, email, name FROM accounts WHERE id = ANY($1)")
                .bind(&ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, email, name)| {
                let id = AccountId::from_uuid(id);
                (id, AccountProfile { id, email, name })
            })
            .collect())
    }
}
