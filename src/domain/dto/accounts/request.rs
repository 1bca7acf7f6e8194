//! 계정 요청 DTO
//!
//! 회원가입, 로그인, 관리자/프로필 변경 요청의 HTTP 본문을 매핑합니다.
//! 입력 검증은 `validator` derive로 선언하고 서비스 계층에서 실행합니다.
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::accounts::Role;

/// bcrypt가 사용하는 비밀번호 최대 길이 (바이트)
pub const MAX_PASSWORD_BYTES: usize = 72;

/// 회원가입 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(
        length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
}

/// 로컬 로그인 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(
        length(min = 1, message = "비밀번호를 입력해주세요"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
}

/// 관리자 역할 변경 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// 프로필 이미지 경로 갱신 요청
///
/// 파일 업로드와 정적 파일 서빙은 외부 구성요소가 담당하고,
/// 이 요청은 이미 저장된 파일의 공개 경로만 계정에 기록합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileImageRequest {
    #[validate(custom(function = "validate_static_path"))]
    pub profile_image_path: String,
}

/// 문자 수가 아닌 UTF-8 바이트 수로 상한을 검사
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("비밀번호는 72바이트를 넘을 수 없습니다".into()));
    }
    Ok(())
}

/// `/static/<파일명>` 형식의 상대 경로만 허용
fn validate_static_path(path: &str) -> Result<(), ValidationError> {
    let file_name = path.strip_prefix("/static/").unwrap_or_default();

    if file_name.is_empty() || file_name.contains("..") || file_name.contains('/') {
        return Err(ValidationError::new("invalid_profile_image_path")
            .with_message("프로필 이미지 경로는 /static/<파일명> 형식이어야 합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_malformed_email() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let request = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "12345".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_accepts_valid_input() {
        let request = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_password_limit_counts_bytes() {
        let at_limit = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "a".repeat(MAX_PASSWORD_BYTES),
        };
        assert!(at_limit.validate().is_ok());

        let over = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "a".repeat(MAX_PASSWORD_BYTES + 1),
        };
        assert!(over.validate().is_err());

        // 25자지만 75바이트
        let multibyte = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "가".repeat(25),
        };
        assert!(multibyte.validate().is_err());

        let login = LoginRequest {
            email: "a@x.com".to_string(),
            password: "a".repeat(MAX_PASSWORD_BYTES + 1),
        };
        assert!(login.validate().is_err());
    }

    #[test]
    fn test_profile_image_path_must_be_static_file() {
        let ok = UpdateProfileImageRequest {
            profile_image_path: "/static/3f2a.png".to_string(),
        };
        assert!(ok.validate().is_ok());

        for bad in ["/static/", "/etc/passwd", "/static/../secret", "http://x/static/a.png"] {
            let request = UpdateProfileImageRequest {
                profile_image_path: bad.to_string(),
            };
            assert!(request.validate().is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_update_role_request_parses_lowercase_role() {
        let request: UpdateRoleRequest = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert_eq!(request.role, Role::Admin);

        assert!(serde_json::from_str::<UpdateRoleRequest>(r#"{"role":"root"}"#).is_err());
    }
}
