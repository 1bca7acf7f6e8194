//! # Domain Entities
//!
//! 저장소에 영속되는 도메인 엔티티입니다.
//!
//! - [`accounts`] - 계정, 계정 식별자, 역할

pub mod accounts;
