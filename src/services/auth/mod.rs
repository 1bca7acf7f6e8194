//! 인증 및 보안 서비스 모듈
//!
//! 비밀번호 해싱과 JWT 토큰 발급/검증을 담당하는 서비스들을 제공합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해시 (환경별 cost)
//! - HMAC-SHA256 토큰 서명, 다른 알고리즘은 거부
//! - 토큰 만료 시간 24시간 고정
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{PasswordService, TokenService};
//!
//! let passwords = PasswordService::new(config.password);
//! let tokens = TokenService::new(&config.jwt);
//!
//! let secret = passwords.hash("secret1")?;
//! let token = tokens.issue(&account_id, "user")?;
//! ```

pub mod password_service;
pub mod token_service;

pub use password_service::PasswordService;
pub use token_service::{TokenError, TokenService};
