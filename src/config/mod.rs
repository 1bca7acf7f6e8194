//! # Configuration Module
//!
//! 계정 서비스의 설정을 기동 시점에 한 번 읽어 타입이 있는 [`AppConfig`]로 만듭니다.
//! 만들어진 설정은 `main`에서 각 서비스 생성자에 명시적으로 전달되며,
//! 런타임에 환경 변수를 다시 읽는 전역 접근자는 없습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소, 비밀번호 해싱, 알림, Rate Limiting
//! - [`auth_config`] - JWT 서명 키, 기본 역할
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-key"
//! ```
//!
//! ### 선택
//!
//! ```bash
//! export ENVIRONMENT="production"     # development, test, staging, production
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export BCRYPT_COST="12"             # 4-15 범위
//! export DEFAULT_ROLE="user"
//! export STORAGE_BACKEND="postgres"   # postgres | mongodb
//! export DATABASE_URL="postgres://postgres@localhost:5432/account_service"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export MONGODB_DATABASE="account_service"
//! export NOTIFICATION_QUEUE_CAPACITY="100"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use crate::errors::ConfigError;

/// 환경 변수 조회 함수
///
/// 테스트에서는 `HashMap` 기반 클로저를 넘겨 프로세스 환경을 건드리지 않습니다.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub account: AccountConfig,
    pub storage: StorageConfig,
    pub notification: NotificationConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    ///
    /// 빈 문자열은 설정되지 않은 것으로 취급합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok().filter(|value| !value.is_empty());
        Self::from_lookup(&lookup)
    }

    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(lookup);

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(lookup)?,
            jwt: JwtConfig::from_lookup(lookup, environment)?,
            password: PasswordConfig::from_lookup(lookup, environment)?,
            account: AccountConfig::from_lookup(lookup)?,
            storage: StorageConfig::from_lookup(lookup)?,
            notification: NotificationConfig::from_lookup(lookup)?,
            rate_limit: RateLimitConfig::from_lookup(lookup)?,
        })
    }
}
