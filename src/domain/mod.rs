//! # Domain Layer Module
//!
//! 계정 서비스의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities   - 영속 엔티티 (Account, AccountId, Role)
//! ├── dto        - 요청/응답 DTO
//! └── models     - 비영속 값 객체 (Claims)
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db)
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::accounts::{Account, AccountId, AccountSummary, NewAccount, Role};
pub use dto::*;
pub use models::token::{Claims, IssuedToken, TOKEN_LIFETIME_SECS};
