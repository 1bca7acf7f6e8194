//! 계정 요청/응답 DTO 모듈

pub mod request;
pub mod response;

pub use request::{LoginRequest, MAX_PASSWORD_BYTES, RegisterRequest, UpdateProfileImageRequest, UpdateRoleRequest};
pub use response::{AccountListResponse, AccountResponse, RegisteredAccount};
