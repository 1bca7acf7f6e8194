use serde::{Deserialize, Serialize};

use crate::domain::entities::accounts::{AccountId, AccountSummary};

/// 회원가입 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredAccount {
    pub message: String,
    pub id: AccountId,
    pub email: String,
}

/// 단일 계정 응답 DTO (프로필 조회, 역할 변경 등)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub message: String,
    pub user: AccountSummary,
}

/// 관리자용 계정 목록 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountListResponse {
    pub users: Vec<AccountSummary>,
}
