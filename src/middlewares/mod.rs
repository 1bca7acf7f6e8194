//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 인증과 권한 확인을 담당합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <token>` 헤더 추출 및 HS256 검증
//! - 검증된 클레임을 request extension에 저장
//! - 실패 시 401, 다음 서비스는 호출하지 않음
//!
//! ### 2. 역할 게이트 (RoleGate)
//! - 클레임의 `role`과 요구 역할의 정확한 일치 확인
//! - 불일치 또는 클레임 없음은 403
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::{AuthMiddleware, RoleGate};
//!
//! App::new()
//!     .app_data(web::Data::from(token_service))
//!     .service(
//!         web::scope("/api/v1/users/profile")
//!             .wrap(AuthMiddleware::required())
//!             .route("", web::get().to(get_profile))
//!     )
//!     .service(
//!         web::scope("/api/v1/admin/users")
//!             .wrap(RoleGate::require("admin"))
//!             .wrap(AuthMiddleware::required())
//!             .route("", web::get().to(list_accounts))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod role_gate;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
pub use role_gate::RoleGate;
