//! # Domain Models Module
//!
//! 영속되지 않는 도메인 값 객체입니다.
//!
//! ## Entities vs Models
//!
//! - **Entities** (`../entities/`): 저장소에 영속되고 식별자를 가짐 (`Account`)
//! - **Models** (`./`): 전송 중에만 존재하는 값 객체 (`Claims`, `IssuedToken`)
//!
//! 토큰 클레임은 서버에 저장되지 않으며 만료 시각이 지나면 자연 소멸합니다.

pub mod token;
