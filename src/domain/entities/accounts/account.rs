//! Account Entity Implementation
//!
//! 계정 엔티티와 저장소 경계에서 사용되는 식별자/역할 타입을 정의합니다.
//! 두 저장소(Postgres, MongoDB)가 같은 타입을 주고받으므로 호출자는
//! 어느 백엔드가 활성화되어 있는지 알 필요가 없습니다.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// 계정 식별자
///
/// 관계형 저장소는 정수 대리키를, 문서 저장소는 ObjectId의 16진수 문자열을 사용합니다.
/// JSON/JWT에서는 각각 숫자와 문자열로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountId {
    /// Postgres `BIGSERIAL` 키
    Numeric(i64),
    /// MongoDB ObjectId (24자리 16진수)
    Document(String),
}

impl AccountId {
    /// URL 경로 세그먼트에서 식별자를 해석합니다.
    ///
    /// 숫자로만 이루어진 값은 `Numeric`, 그 외는 `Document`가 됩니다.
    /// 형식 검증은 각 저장소가 담당하며 맞지 않으면 `NotFound`로 응답합니다.
    pub fn from_path(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(id) => AccountId::Numeric(id),
            Err(_) => AccountId::Document(raw.to_string()),
        }
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Numeric(id) => write!(f, "{}", id),
            AccountId::Document(id) => f.write_str(id),
        }
    }
}

/// 계정 역할
///
/// 단일 값 역할만 지원하며 역할 간 계층은 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::ValidationError(format!("unknown role `{}`", other))),
        }
    }
}

/// 계정 엔티티
///
/// 비밀번호 해시를 포함하므로 직렬화하지 않습니다.
/// 외부로 내보낼 때는 [`AccountSummary`]로 변환합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    /// 이메일 (저장소 레벨 unique)
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    /// 프로필 이미지 공개 경로 (`/static/...`)
    pub profile_image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 소프트 삭제 시각 (관계형 저장소 전용)
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    /// 비밀번호 해시를 제외한 요약 정보
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
            profile_image_path: self.profile_image_path.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// 비밀번호 해시가 없는 계정 투영
///
/// 목록 조회와 프로필 응답은 항상 이 타입을 사용하므로
/// 해시가 응답에 섞일 수 있는 경로가 타입 수준에서 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 저장 전 신규 계정
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}
