//! # Postgres 계정 리포지토리
//!
//! sqlx 런타임 쿼리로 `accounts` 테이블을 다룹니다.
//!
//! ## 스키마
//!
//! | 컬럼 | 타입 | 비고 |
//! |------|------|------|
//! | `id` | `BIGSERIAL` | PK |
//! | `email` | `TEXT` | `accounts_email_unique` |
//! | `password_hash` | `TEXT` | |
//! | `role` | `TEXT` | 기본값 `'user'` |
//! | `profile_image_path` | `TEXT NULL` | |
//! | `created_at` / `updated_at` | `TIMESTAMPTZ` | 기본값 `now()` |
//! | `deleted_at` | `TIMESTAMPTZ NULL` | 소프트 삭제 |
//!
//! 모든 조회와 갱신은 `deleted_at IS NULL`인 행만 대상으로 합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use sqlx::postgres::PgPool;
use sqlx::FromRow;

use crate::domain::entities::accounts::{Account, AccountId, AccountSummary, NewAccount, Role};
use crate::errors::{AppError, AppResult};

use super::AccountRepository;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id                 BIGSERIAL PRIMARY KEY,
    email              TEXT NOT NULL,
    password_hash      TEXT NOT NULL,
    role               TEXT NOT NULL DEFAULT 'user',
    profile_image_path TEXT NULL,
    created_at         TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at         TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at         TIMESTAMPTZ NULL
)
"#;

const CREATE_EMAIL_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS accounts_email_unique ON accounts (email)";

const ACCOUNT_COLUMNS: &str =
    "id, email, password_hash, role, profile_image_path, created_at, updated_at, deleted_at";

const SUMMARY_COLUMNS: &str = "id, email, role, profile_image_path, created_at, updated_at";

/// `accounts` 테이블 전체 행
#[derive(Debug, Clone, FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    password_hash: String,
    role: String,
    profile_image_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId::Numeric(row.id),
            email: row.email,
            password_hash: row.password_hash,
            role: parse_stored_role(&row.role)?,
            profile_image_path: row.profile_image_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

/// 비밀번호 해시를 제외한 행
#[derive(Debug, Clone, FromRow)]
struct SummaryRow {
    id: i64,
    email: String,
    role: String,
    profile_image_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SummaryRow> for AccountSummary {
    type Error = AppError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        Ok(AccountSummary {
            id: AccountId::Numeric(row.id),
            email: row.email,
            role: parse_stored_role(&row.role)?,
            profile_image_path: row.profile_image_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// 저장된 역할 문자열이 알 수 없는 값이면 데이터 손상으로 봅니다.
fn parse_stored_role(raw: &str) -> AppResult<Role> {
    raw.parse::<Role>()
        .map_err(|_| AppError::DatabaseError(format!("저장된 역할 값이 올바르지 않습니다: {}", raw)))
}

/// 관계형 저장소는 정수 식별자만 다룹니다.
fn numeric_id(id: &AccountId) -> Option<i64> {
    match id {
        AccountId::Numeric(id) => Some(*id),
        AccountId::Document(_) => None,
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Account not found".to_string())
}

fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::DuplicateAccount;
        }
    }
    AppError::DatabaseError(e.to_string())
}

/// Postgres 계정 리포지토리
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `accounts` 테이블과 이메일 unique 인덱스를 생성합니다.
    ///
    /// 이미 있으면 아무것도 하지 않으므로 기동할 때마다 호출해도 됩니다.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        sqlx::query(CREATE_EMAIL_INDEX)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        info!("✅ accounts 테이블 준비 완료");
        Ok(())
    }

    async fn fetch_summary(&self, sql: &str, id: i64, value: &str) -> AppResult<AccountSummary> {
        let row = sqlx::query_as::<_, SummaryRow>(sql)
            .bind(id)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(not_found)?;

        AccountSummary::try_from(row)
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, account: NewAccount) -> AppResult<AccountId> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO accounts (email, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!("계정 생성: id={}", id);
        Ok(AccountId::Numeric(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Account> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE email = $1 AND deleted_at IS NULL",
            ACCOUNT_COLUMNS
        );

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(not_found)?;

        Account::try_from(row)
    }

    async fn find_by_id(&self, id: &AccountId) -> AppResult<Account> {
        let id = numeric_id(id).ok_or_else(not_found)?;
        let sql = format!(
            "SELECT {} FROM accounts WHERE id = $1 AND deleted_at IS NULL",
            ACCOUNT_COLUMNS
        );

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(not_found)?;

        Account::try_from(row)
    }

    async fn list(&self) -> AppResult<Vec<AccountSummary>> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE deleted_at IS NULL ORDER BY id",
            SUMMARY_COLUMNS
        );

        let rows = sqlx::query_as::<_, SummaryRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(AccountSummary::try_from).collect()
    }

    async fn update_role(&self, id: &AccountId, role: Role) -> AppResult<AccountSummary> {
        let id = numeric_id(id).ok_or_else(not_found)?;
        let sql = format!(
            "UPDATE accounts SET role = $2, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            SUMMARY_COLUMNS
        );

        self.fetch_summary(&sql, id, role.as_str()).await
    }

    async fn update_profile_image(&self, id: &AccountId, path: &str) -> AppResult<AccountSummary> {
        let id = numeric_id(id).ok_or_else(not_found)?;
        let sql = format!(
            "UPDATE accounts SET profile_image_path = $2, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            SUMMARY_COLUMNS
        );

        self.fetch_summary(&sql, id, path).await
    }
}
