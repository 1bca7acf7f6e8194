//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 요청/응답 구조체입니다.
//! 엔티티를 그대로 노출하지 않고, 응답에는 비밀번호 해시가 포함되지 않습니다.

pub mod accounts;

pub use accounts::*;
