//! 계정 인증 서비스
//!
//! 이메일/비밀번호 계정을 등록하고, 로그인 시 HS256 JWT를 발급하며,
//! Bearer 토큰과 역할로 보호되는 REST API를 제공하는 Rust 서비스입니다.
//!
//! # Features
//!
//! - **계정 관리**: 회원가입, 본인 프로필 조회, 프로필 이미지 경로 갱신
//! - **JWT 인증**: 24시간 만료 HS256 액세스 토큰 (상태 없음)
//! - **역할 게이트**: `admin` 전용 계정 목록/역할 변경
//! - **저장소 선택**: Postgres(sqlx) 또는 MongoDB 중 기동 시 하나를 선택
//! - **환영 알림**: 요청 경로와 분리된 bounded 큐로 발송
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 인증/역할 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← AccountService, PasswordService, TokenService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← AccountRepository 트레이트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Postgres | Mongo│ ← 저장소 (프로세스당 하나)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use account_service::services::accounts::AccountService;
//!
//! let service = AccountService::new(repo, passwords, tokens, notifications, config.account);
//! let registered = service.register(request).await?;
//! let issued = service.login(credentials).await?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
