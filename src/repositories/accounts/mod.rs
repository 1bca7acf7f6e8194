//! 계정 데이터 액세스 계층
//!
//! 두 저장소 구현이 같은 [`AccountRepository`] 계약을 따릅니다.
//!
//! - [`PgAccountRepository`](pg_account_repo::PgAccountRepository) - sqlx + Postgres (`accounts` 테이블)
//! - [`MongoAccountRepository`](mongo_account_repo::MongoAccountRepository) - MongoDB (`accounts` 컬렉션)
//!
//! 호출자는 `Arc<dyn AccountRepository>`만 보유하므로 어느 백엔드가 선택되었는지 알지 못합니다.
//! 에러 종류와 필드 의미는 두 구현에서 동일합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let repo: Arc<dyn AccountRepository> = Arc::new(PgAccountRepository::new(pool));
//! let id = repo.create(new_account).await?;
//! let account = repo.find_by_id(&id).await?;
//! ```

use async_trait::async_trait;

use crate::domain::entities::accounts::{Account, AccountId, AccountSummary, NewAccount, Role};
use crate::errors::AppResult;

pub mod mongo_account_repo;
pub mod pg_account_repo;
#[cfg(test)]
pub mod memory_account_repo;

pub use mongo_account_repo::MongoAccountRepository;
pub use pg_account_repo::PgAccountRepository;
#[cfg(test)]
pub use memory_account_repo::MemoryAccountRepository;

/// 계정 저장소 계약
///
/// # 에러 규칙
///
/// * `AppError::DuplicateAccount` - 저장소의 unique 제약 위반 (동시 가입 경쟁의 최종 판정)
/// * `AppError::NotFound` - 대상 없음. 다른 백엔드 형태의 식별자나 해석할 수 없는 식별자도 포함
/// * `AppError::DatabaseError` - 그 외 드라이버 오류
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// 로그와 헬스 체크에 표시되는 백엔드 이름
    fn backend_name(&self) -> &'static str;

    /// 새 계정을 저장하고 저장소가 부여한 식별자를 반환합니다.
    async fn create(&self, account: NewAccount) -> AppResult<AccountId>;

    async fn find_by_email(&self, email: &str) -> AppResult<Account>;

    async fn find_by_id(&self, id: &AccountId) -> AppResult<Account>;

    /// 전체 계정 목록. 비밀번호 해시는 조회 단계에서부터 제외됩니다.
    async fn list(&self) -> AppResult<Vec<AccountSummary>>;

    async fn update_role(&self, id: &AccountId, role: Role) -> AppResult<AccountSummary>;

    async fn update_profile_image(&self, id: &AccountId, path: &str) -> AppResult<AccountSummary>;
}
