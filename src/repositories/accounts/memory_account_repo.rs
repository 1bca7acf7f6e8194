//! 테스트용 인메모리 계정 저장소
//!
//! Postgres 구현과 같은 형태의 정수 식별자를 순서대로 발급합니다.
//! 이메일 중복 검사는 잠금 안에서 수행되어 저장소 unique 인덱스와 같은 보장을 합니다.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::accounts::{Account, AccountId, AccountSummary, NewAccount, Role};
use crate::errors::{AppError, AppResult};

use super::AccountRepository;

#[derive(Default)]
struct State {
    next_id: i64,
    accounts: HashMap<i64, Account>,
}

#[derive(Default)]
pub struct MemoryAccountRepository {
    state: Mutex<State>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 계정 수
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().accounts.len()
    }

    fn update<F>(&self, id: &AccountId, apply: F) -> AppResult<AccountSummary>
    where
        F: FnOnce(&mut Account),
    {
        let AccountId::Numeric(id) = id else {
            return Err(not_found());
        };

        let mut state = self.state.lock().unwrap();
        let account = state.accounts.get_mut(id).ok_or_else(not_found)?;
        apply(account);
        account.updated_at = Utc::now();
        Ok(account.summary())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Account not found".to_string())
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, account: NewAccount) -> AppResult<AccountId> {
        let mut state = self.state.lock().unwrap();

        if state.accounts.values().any(|a| a.email == account.email) {
            return Err(AppError::DuplicateAccount);
        }

        state.next_id += 1;
        let id = state.next_id;
        let now = Utc::now();
        state.accounts.insert(
            id,
            Account {
                id: AccountId::Numeric(id),
                email: account.email,
                password_hash: account.password_hash,
                role: account.role,
                profile_image_path: None,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
        );

        Ok(AccountId::Numeric(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Account> {
        let state = self.state.lock().unwrap();
        state
            .accounts
            .values()
            .find(|a| a.email == email)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn find_by_id(&self, id: &AccountId) -> AppResult<Account> {
        let AccountId::Numeric(id) = id else {
            return Err(not_found());
        };

        let state = self.state.lock().unwrap();
        state.accounts.get(id).cloned().ok_or_else(not_found)
    }

    async fn list(&self) -> AppResult<Vec<AccountSummary>> {
        let state = self.state.lock().unwrap();
        let mut summaries: Vec<AccountSummary> =
            state.accounts.values().map(Account::summary).collect();
        summaries.sort_by_key(|s| match s.id {
            AccountId::Numeric(id) => id,
            AccountId::Document(_) => i64::MAX,
        });
        Ok(summaries)
    }

    async fn update_role(&self, id: &AccountId, role: Role) -> AppResult<AccountSummary> {
        self.update(id, |account| account.role = role)
    }

    async fn update_profile_image(&self, id: &AccountId, path: &str) -> AppResult<AccountSummary> {
        self.update(id, |account| account.profile_image_path = Some(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::User,
        }
    }

    #[actix_web::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = MemoryAccountRepository::new();

        assert_eq!(repo.create(new_account("a@x.com")).await.unwrap(), AccountId::Numeric(1));
        assert!(matches!(
            repo.create(new_account("a@x.com")).await,
            Err(AppError::DuplicateAccount)
        ));
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_document_id_is_not_found() {
        let repo = MemoryAccountRepository::new();
        repo.create(new_account("a@x.com")).await.unwrap();

        let id = AccountId::Document("1".to_string());
        assert!(matches!(repo.find_by_id(&id).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_update_role_returns_fresh_summary() {
        let repo = MemoryAccountRepository::new();
        let id = repo.create(new_account("a@x.com")).await.unwrap();

        let summary = repo.update_role(&id, Role::Admin).await.unwrap();

        assert_eq!(summary.role, Role::Admin);
        assert_eq!(repo.find_by_id(&id).await.unwrap().role, Role::Admin);
    }
}
