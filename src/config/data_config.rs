//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 비밀번호 해싱, 서버 바인딩, 저장소, 알림 큐, Rate Limiting 설정을 관리합니다.

use crate::errors::ConfigError;

use super::EnvLookup;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 값에서 실행 환경을 감지합니다.
    ///
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Self {
        lookup("ENVIRONMENT")
            .map(|value| Self::parse_lenient(&value))
            .unwrap_or(Environment::Production)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PasswordConfig {
    /// bcrypt cost (4-15)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// `BCRYPT_COST`가 있으면 사용하고, 없으면 환경별 기본값을 사용합니다.
    ///
    /// 범위를 벗어나거나 숫자가 아닌 값은 기동을 거부합니다.
    pub fn from_lookup(lookup: EnvLookup<'_>, env: Environment) -> Result<Self, ConfigError> {
        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => {
                let cost = raw.parse::<u32>().map_err(|e| ConfigError::Invalid {
                    key: "BCRYPT_COST",
                    reason: e.to_string(),
                })?;
                if !(4..=15).contains(&cost) {
                    return Err(ConfigError::Invalid {
                        key: "BCRYPT_COST",
                        reason: format!("{} is outside 4..=15", cost),
                    });
                }
                cost
            }
            None => Self::bcrypt_cost_for_env(&env),
        };

        Ok(Self { bcrypt_cost })
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `HOST` (기본값 `0.0.0.0`), `PORT` (기본값 `8080`)
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(lookup, "PORT", 8080)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 활성화할 계정 저장소 종류
///
/// 프로세스당 정확히 하나의 백엔드만 생성됩니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageBackend {
    Postgres,
    MongoDb,
}

/// 저장소 연결 설정
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Postgres 연결 URL
    pub database_url: String,
    /// Postgres 풀 최대 연결 수
    pub max_connections: u32,
    /// MongoDB 연결 URI
    pub mongodb_uri: String,
    /// MongoDB 데이터베이스 이름
    pub mongodb_database: String,
}

impl StorageConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let backend = match lookup("STORAGE_BACKEND").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("mongodb") | Some("mongo") => StorageBackend::MongoDb,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    reason: format!("`{}` is not one of postgres, mongodb", other),
                });
            }
        };

        Ok(Self {
            backend,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| {
                "postgres://postgres@localhost:5432/account_service".to_string()
            }),
            max_connections: parse_or(lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            mongodb_database: lookup("MONGODB_DATABASE")
                .unwrap_or_else(|| "account_service".to_string()),
        })
    }
}

/// 환영 알림 큐 설정
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotificationConfig {
    /// 대기 가능한 최대 알림 수. 초과분은 로그를 남기고 버립니다.
    pub queue_capacity: usize,
}

impl NotificationConfig {
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let queue_capacity = parse_or(lookup, "NOTIFICATION_QUEUE_CAPACITY", 100usize)?;
        if queue_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "NOTIFICATION_QUEUE_CAPACITY",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self { queue_capacity })
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND` (기본값 100), `RATE_LIMIT_BURST_SIZE` (기본값 200)
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            per_second: parse_or(lookup, "RATE_LIMIT_PER_SECOND", 100)?,
            burst_size: parse_or(lookup, "RATE_LIMIT_BURST_SIZE", 200)?,
        })
    }
}

fn parse_or<T>(lookup: EnvLookup<'_>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::parse_lenient("development"),
            Environment::Development
        );
        assert_eq!(Environment::parse_lenient("test"), Environment::Test);
        assert_eq!(Environment::parse_lenient("production"), Environment::Production);
        assert_eq!(Environment::parse_lenient("unknown"), Environment::Production);
    }

    #[test]
    fn test_environment_defaults_to_production() {
        let lookup = lookup_from(&[]);
        assert_eq!(Environment::from_lookup(&lookup), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Development),
            4
        );
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Staging),
            10
        );
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Production),
            12
        );
    }

    #[test]
    fn test_bcrypt_cost_out_of_range_is_rejected() {
        let lookup = lookup_from(&[("BCRYPT_COST", "31")]);
        let result = PasswordConfig::from_lookup(&lookup, Environment::Production);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "BCRYPT_COST", .. })
        ));
    }

    #[test]
    fn test_server_config_defaults() {
        let lookup = lookup_from(&[]);
        let config = ServerConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_storage_backend_selection() {
        let lookup = lookup_from(&[]);
        assert_eq!(
            StorageConfig::from_lookup(&lookup).unwrap().backend,
            StorageBackend::Postgres
        );

        let lookup = lookup_from(&[("STORAGE_BACKEND", "mongodb")]);
        assert_eq!(
            StorageConfig::from_lookup(&lookup).unwrap().backend,
            StorageBackend::MongoDb
        );

        let lookup = lookup_from(&[("STORAGE_BACKEND", "sqlite")]);
        assert!(StorageConfig::from_lookup(&lookup).is_err());
    }

    #[test]
    fn test_notification_queue_capacity_must_be_positive() {
        let lookup = lookup_from(&[("NOTIFICATION_QUEUE_CAPACITY", "0")]);
        assert!(NotificationConfig::from_lookup(&lookup).is_err());

        let lookup = lookup_from(&[]);
        assert_eq!(
            NotificationConfig::from_lookup(&lookup).unwrap().queue_capacity,
            100
        );
    }
}
