//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 설정을 받아 한 번 생성되고 `web::Data`로 핸들러와
//! 미들웨어에 주입됩니다.
//!
//! # Features
//!
//! - 계정 등록/로그인/프로필 관리 ([`accounts`])
//! - 비밀번호 해싱과 JWT 토큰 발급/검증 ([`auth`])
//! - 가입 환영 알림 큐 ([`notifications`])
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{accounts::AccountService, auth::TokenService};
//!
//! let tokens = Arc::new(TokenService::new(&config.jwt));
//! let accounts = AccountService::new(repo, passwords, tokens.clone(), dispatcher, config.account);
//! ```

pub mod accounts;
pub mod auth;
pub mod notifications;
