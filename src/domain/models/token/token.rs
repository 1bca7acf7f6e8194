//! JWT 클레임 구조체
//!
//! 로그인 시 발급되는 토큰의 페이로드와, 검증된 클레임을 핸들러로 전달하는
//! 추출자(`FromRequest`)를 정의합니다.
use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::entities::accounts::AccountId;
use crate::errors::AppError;

/// 토큰 수명 (초). 외부에서 설정할 수 없습니다.
pub const TOKEN_LIFETIME_SECS: i64 = 86_400;

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 계정 식별자 (백엔드 고유 형태)
/// - `role`: 발급 시점의 계정 역할
/// - `iat` / `exp`: 발급/만료 시각 (Unix seconds, `exp - iat == 86400`)
///
/// 발급 후에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: AccountId,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// 로그인 응답에 담기는 토큰 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: String,
    /// 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

impl IssuedToken {
    pub fn bearer(token: String) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in: TOKEN_LIFETIME_SECS,
        }
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 미들웨어가 request extensions에 넣어 둔 클레임을 꺼냅니다.
/// 미들웨어를 거치지 않은 라우트에서 사용하면 401을 반환합니다.
impl FromRequest for Claims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(claims.clone())),
            None => ready(Err(AppError::AuthenticationFailed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_claims_extractor_reads_extensions() {
        let claims = Claims {
            sub: AccountId::Numeric(3),
            role: "user".to_string(),
            iat: 0,
            exp: TOKEN_LIFETIME_SECS,
        };

        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(claims.clone());

        let extracted = Claims::extract(&req).await.unwrap();
        assert_eq!(extracted, claims);
    }

    #[actix_web::test]
    async fn test_claims_extractor_without_middleware_is_unauthorized() {
        let req = TestRequest::default().to_http_request();

        let result = Claims::extract(&req).await;
        assert!(matches!(result, Err(AppError::AuthenticationFailed)));
    }
}
