//! 비밀번호 해싱 서비스
//!
//! bcrypt 기반의 단방향 해시와 검증을 제공합니다.
//! 두 연산 모두 CPU만 사용하는 유한 시간 작업이며, 비용은 `cost` 하나로 조절됩니다.

use crate::config::PasswordConfig;
use crate::domain::dto::accounts::MAX_PASSWORD_BYTES;
use crate::errors::AppError;

/// bcrypt 비밀번호 해싱 서비스
///
/// 상태가 없으므로 `Copy`이며 여러 요청이 동시에 사용해도 안전합니다.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(config: PasswordConfig) -> Self {
        Self {
            cost: config.bcrypt_cost,
        }
    }

    /// 솔트가 포함된 bcrypt 해시를 생성합니다.
    ///
    /// 72바이트를 넘는 입력은 잘라내지 않고 거부합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 난수 생성 실패, 잘못된 cost 또는 72바이트 초과
    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        bcrypt::non_truncating_hash(plaintext, self.cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }

    /// 평문과 저장된 해시를 비교합니다.
    ///
    /// 불일치는 `Ok(false)`이고, 저장된 해시 형식이 잘못된 경우에만 에러를 반환합니다.
    /// 비교는 bcrypt 내부의 상수 시간 비교를 사용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 저장된 해시가 bcrypt 형식이 아님
    pub fn verify(&self, plaintext: &str, secret: &str) -> Result<bool, AppError> {
        // 72바이트를 넘는 평문으로 만든 해시는 존재하지 않음
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        bcrypt::verify(plaintext, secret)
            .map_err(|e| AppError::InternalError(format!("저장된 비밀번호 해시가 올바르지 않습니다: {}", e)))
    }
}
