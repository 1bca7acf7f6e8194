//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 도메인 에러를
//! 경계(핸들러/미들웨어)에서 하나의 HTTP 응답으로 변환합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status |
//! |----------|-------------|
//! | `ValidationError` | 400 Bad Request |
//! | `DuplicateAccount` | 400 Bad Request |
//! | `AuthenticationFailed` | 401 Unauthorized |
//! | `AuthorizationDenied` | 403 Forbidden |
//! | `NotFound` | 404 Not Found |
//! | `DatabaseError` / `InternalError` | 500 Internal Server Error |
//!
//! 500 계열 에러의 상세 내용은 로그에만 남고 클라이언트에게는 노출되지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find(repo: &dyn AccountRepository, email: &str) -> Result<Account, AppError> {
//!     if email.is_empty() {
//!         return Err(AppError::ValidationError("Email is required".to_string()));
//!     }
//!     repo.find_by_email(email).await
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 인증 실패 시 클라이언트에게 전달되는 고정 메시지
///
/// 존재하지 않는 계정과 잘못된 비밀번호가 같은 응답을 받아야 하므로
/// 어떤 경로로 실패하든 이 문자열만 사용합니다.
pub const AUTHENTICATION_FAILED_MESSAGE: &str = "Invalid email or password";

/// 애플리케이션 전역 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 이미 등록된 이메일 (400 Bad Request)
    #[error("Account already exists")]
    DuplicateAccount,

    /// 인증 실패 (401 Unauthorized)
    ///
    /// 원인(계정 없음, 비밀번호 불일치, 토큰 오류)을 구분하지 않습니다.
    #[error("{}", AUTHENTICATION_FAILED_MESSAGE)]
    AuthenticationFailed,

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어가는 에러 종류 식별자
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::DuplicateAccount => "duplicate_account",
            AppError::AuthenticationFailed => "authentication_failed",
            AppError::AuthorizationDenied(_) => "authorization_denied",
            AppError::NotFound(_) => "not_found",
            AppError::DatabaseError(_) | AppError::InternalError(_) => "internal_error",
        }
    }

    /// 클라이언트에게 노출해도 되는 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateAccount => StatusCode::BAD_REQUEST,
            AppError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 500 계열은 상세 내용을 로그로만 남기고 일반 메시지를 반환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.kind(),
                "message": self.public_message(),
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 `InternalError`로 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

/// 시작 시점 설정 로딩 에러
///
/// HTTP 응답으로 변환되지 않으며, 발생하면 프로세스가 기동을 거부합니다.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// 필수 환경 변수 누락
    #[error("required configuration `{0}` is not set")]
    Missing(&'static str),

    /// 값은 있으나 형식이나 범위가 잘못됨
    #[error("configuration `{key}` is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}
