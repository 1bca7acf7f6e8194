//! 계정 관리 서비스 모듈
//!
//! [`AccountService`](account_service::AccountService)를 통해 회원가입, 로그인,
//! 프로필 조회, 관리자 역할 변경을 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::accounts::AccountService;
//!
//! let registered = account_service.register(request).await?;
//! let issued = account_service.login(login).await?;
//! ```

pub mod account_service;

pub use account_service::AccountService;
