//! # Authentication Configuration Module
//!
//! JWT 서명 키와 계정 기본 역할 설정을 관리합니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key-at-least-32-bytes"
//! ```
//!
//! 서명 키에는 코드에 내장된 기본값이 없습니다. 값이 없으면 서비스는 기동하지 않습니다.
//! 토큰 수명은 24시간으로 고정되어 있어 설정 항목이 없습니다.

use std::fmt;

use crate::domain::entities::accounts::Role;
use crate::errors::ConfigError;

use super::{EnvLookup, Environment};

/// 프로덕션에서 허용하는 최소 서명 키 길이 (바이트)
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// JWT 서명 설정
///
/// `Debug` 출력에서 서명 키는 가려집니다.
#[derive(Clone, PartialEq)]
pub struct JwtConfig {
    secret: String,
}

impl JwtConfig {
    /// `JWT_SECRET`을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::Missing` - 값이 없거나 비어 있음
    /// * `ConfigError::Invalid` - 프로덕션에서 32바이트 미만
    pub fn from_lookup(lookup: EnvLookup<'_>, env: Environment) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        if env == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!(
                    "must be at least {} bytes in production",
                    MIN_PRODUCTION_SECRET_LEN
                ),
            });
        }

        Ok(Self { secret })
    }

    /// 명시적인 서명 키로 생성합니다.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// 계정 생성 설정
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountConfig {
    /// 신규 가입 계정에 부여되는 역할
    pub default_role: Role,
}

impl AccountConfig {
    /// `DEFAULT_ROLE` (기본값 `user`)
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let default_role = match lookup("DEFAULT_ROLE") {
            Some(raw) => raw.parse::<Role>().map_err(|e| ConfigError::Invalid {
                key: "DEFAULT_ROLE",
                reason: e.to_string(),
            })?,
            None => Role::User,
        };

        Ok(Self { default_role })
    }
}
