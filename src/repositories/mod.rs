//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 계정 저장소 계약([`AccountRepository`](accounts::AccountRepository))과
//! Postgres/MongoDB 구현을 제공합니다. 기동 시 설정에 따라 하나만 생성되어
//! `Arc<dyn AccountRepository>`로 서비스 계층에 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::accounts::{AccountRepository, PgAccountRepository};
//!
//! let repo = PgAccountRepository::new(pool);
//! repo.migrate().await?;
//! let account = repo.find_by_email("user@example.com").await?;
//! ```

pub mod accounts;
