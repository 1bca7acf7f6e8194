//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Middlewares - 인증(AuthMiddleware), 역할(RoleGate)
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직 (AccountService)
//! ├─────────────────────────────────────────────┤
//!   Repositories - Postgres | MongoDB
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 얇게 유지합니다. JSON 본문을 DTO로 받아 `web::Data<AccountService>`에
//! 넘기고, 결과를 상태 코드와 함께 반환하는 일만 합니다.
//!
//! ## 모듈 구성
//!
//! - [`accounts`] - 회원가입, 로그인, 본인 프로필
//! - [`admin`] - 계정 목록, 역할 변경

pub mod accounts;
pub mod admin;
