//! JWT 토큰 관리 서비스 구현
//!
//! HS256으로 서명된 24시간 수명의 액세스 토큰을 발급하고 검증합니다.
//! 토큰은 서버에 저장되지 않으며 유효성은 서명과 만료 시각만으로 결정됩니다.
//! 검증 중 데이터베이스 조회가 없으므로 역할이 바뀌거나 비활성화된 계정의
//! 토큰도 만료 전까지는 유효합니다.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::config::JwtConfig;
use crate::domain::entities::accounts::AccountId;
use crate::domain::models::token::{Claims, TOKEN_LIFETIME_SECS};
use crate::errors::AppError;

/// 허용하는 유일한 서명 알고리즘
const EXPECTED_ALGORITHM: &str = "HS256";

/// 토큰 검증 실패 사유
///
/// 경계에서는 모두 `AppError::AuthenticationFailed`로 합쳐지고,
/// 사유는 디버그 로그로만 남습니다.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signing algorithm is not supported")]
    UnsupportedAlgorithm,
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        log::debug!("토큰 검증 실패: {}", err);
        AppError::AuthenticationFailed
    }
}

/// 서명 알고리즘만 확인하기 위한 헤더 투영
#[derive(Deserialize)]
struct UntrustedHeader {
    alg: String,
}

/// JWT 토큰 관리 서비스
///
/// 서명 키는 생성 시점에 설정에서 받아 키 객체로 보관합니다.
/// 불변이므로 `web::Data`로 공유되어 동시에 호출되어도 잠금이 필요 없습니다.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
        }
    }

    /// 계정에 대한 액세스 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 직렬화/서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.issue(&account.id, account.role.as_str())?;
    /// ```
    pub fn issue(&self, subject: &AccountId, role: &str) -> Result<String, AppError> {
        self.issue_at(subject, role, Utc::now())
    }

    /// 지정한 시각을 발급 시각으로 사용해 토큰을 발급합니다.
    pub fn issue_at(
        &self,
        subject: &AccountId,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: subject.clone(),
            role: role.to_string(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰 검증 및 클레임 추출
    ///
    /// 순서대로 구조, 알고리즘, 서명, 페이로드, 만료를 확인합니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::Malformed` - 세 부분 구조가 아니거나 디코딩 불가
    /// * `TokenError::UnsupportedAlgorithm` - 헤더의 `alg`가 `HS256`이 아님
    /// * `TokenError::SignatureInvalid` - 서명 불일치
    /// * `TokenError::Expired` - `exp <= now`
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// 지정한 시각 기준으로 토큰을 검증합니다.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let header = Self::read_header(token)?;
        if header.alg != EXPECTED_ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // 만료는 아래에서 leeway 없이 직접 비교
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::UnsupportedAlgorithm
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// `Authorization` 헤더 값에서 토큰 부분 추출
    ///
    /// 정확히 `Bearer <token>` 형식만 허용합니다.
    /// 공백 하나로 나뉜 두 부분이어야 하고 스킴은 대소문자를 구분합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = TokenService::extract_bearer_token("Bearer eyJhbGciOiJIUzI1NiJ9...")?;
    /// ```
    pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
        let mut parts = auth_header.split(' ');

        match (parts.next(), parts.next(), parts.next()) {
            (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
            _ => Err(AppError::AuthenticationFailed),
        }
    }

    fn read_header(token: &str) -> Result<UntrustedHeader, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        // 빈 서명은 알고리즘 확인 뒤 서명 단계에서 거부
        if segments.len() != 3 || segments[0].is_empty() || segments[1].is_empty() {
            return Err(TokenError::Malformed);
        }

        let raw = URL_SAFE_NO_PAD
            .decode(segments[0])
            .map_err(|_| TokenError::Malformed)?;

        serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)
    }
}
