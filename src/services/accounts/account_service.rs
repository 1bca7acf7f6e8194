//! # 계정 관리 서비스 구현
//!
//! 회원가입, 로그인, 프로필 조회와 관리자 역할 변경을 담당하는 비즈니스 로직입니다.
//!
//! ## 서비스 구성
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       AccountService                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  register  : 검증 → 중복 사전확인 → 해싱 → 저장 → 환영 알림   │
//! │  login     : 조회 → 비밀번호 검증 → 토큰 발급                │
//! │  profile   : 토큰 주체로 최신 계정 조회                      │
//! │  change_role / set_profile_image / list_accounts            │
//! └─────────────────────────────────────────────────────────────┘
//!          │                 │                   │
//!          ▼                 ▼                   ▼
//!  AccountRepository   PasswordService     TokenService
//!  (Postgres|MongoDB)  (bcrypt, 블로킹 풀)  (HS256)
//! ```
//!
//! ## 보안 규칙
//!
//! - 존재하지 않는 이메일과 틀린 비밀번호는 같은 `AuthenticationFailed`로 응답
//! - bcrypt 연산은 `web::block`으로 블로킹 스레드 풀에서 실행
//! - 비밀번호, 해시, 토큰은 로그에 남기지 않음

use std::sync::Arc;

use actix_web::web;
use log::{info, warn};
use validator::Validate;

use crate::config::AccountConfig;
use crate::domain::dto::accounts::{
    LoginRequest, RegisterRequest, RegisteredAccount, UpdateProfileImageRequest,
};
use crate::domain::entities::accounts::{AccountId, AccountSummary, NewAccount, Role};
use crate::domain::models::token::{Claims, IssuedToken};
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::accounts::AccountRepository;
use crate::services::auth::{PasswordService, TokenService};
use crate::services::notifications::WelcomeDispatcher;

/// 계정 관리 비즈니스 로직 서비스
///
/// 모든 협력 객체는 `main`에서 생성되어 주입됩니다.
/// 내부 상태가 없으므로 `web::Data`로 공유해 동시에 호출해도 안전합니다.
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
    notifications: WelcomeDispatcher,
    default_role: Role,
}

impl AccountService {
    pub fn new(
        repo: Arc<dyn AccountRepository>,
        passwords: PasswordService,
        tokens: Arc<TokenService>,
        notifications: WelcomeDispatcher,
        config: AccountConfig,
    ) -> Self {
        Self {
            repo,
            passwords,
            tokens,
            notifications,
            default_role: config.default_role,
        }
    }

    /// 활성화된 저장소 백엔드 이름
    pub fn backend_name(&self) -> &'static str {
        self.repo.backend_name()
    }

    /// 새 계정 등록
    ///
    /// # 처리 과정
    ///
    /// 1. 입력 검증 (이메일 형식, 비밀번호 6자 이상)
    /// 2. 이메일 중복 사전 확인 (최종 판정은 저장소 unique 인덱스)
    /// 3. 블로킹 풀에서 비밀번호 해싱
    /// 4. 설정된 기본 역할로 저장
    /// 5. 환영 알림을 큐에 넣음 (실패해도 가입은 성공)
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 입력 검증 실패
    /// * `AppError::DuplicateAccount` - 이미 등록된 이메일
    /// * `AppError::InternalError` / `AppError::DatabaseError` - 해싱/저장 실패
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisteredAccount> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let RegisterRequest { email, password } = request;

        match self.repo.find_by_email(&email).await {
            Ok(_) => return Err(AppError::DuplicateAccount),
            Err(AppError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let password_hash = self.hash_password(password).await?;

        let id = self
            .repo
            .create(NewAccount {
                email: email.clone(),
                password_hash,
                role: self.default_role,
            })
            .await?;

        info!("계정 등록 완료: id={} backend={}", id, self.repo.backend_name());

        self.notifications.dispatch(&email);

        Ok(RegisteredAccount {
            message: "Account registered successfully".to_string(),
            id,
            email,
        })
    }

    /// 이메일/비밀번호 로그인
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 입력 검증 실패
    /// * `AppError::AuthenticationFailed` - 계정 없음 또는 비밀번호 불일치 (구분하지 않음)
    pub async fn login(&self, request: LoginRequest) -> AppResult<IssuedToken> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let account = match self.repo.find_by_email(&request.email).await {
            Ok(account) => account,
            Err(AppError::NotFound(_)) => {
                warn!("로그인 실패: 등록되지 않은 이메일");
                return Err(AppError::AuthenticationFailed);
            }
            Err(e) => return Err(e),
        };

        let passwords = self.passwords;
        let password = request.password;
        let secret = account.password_hash.clone();
        let matches = web::block(move || passwords.verify(&password, &secret))
            .await
            .context("비밀번호 검증 작업 실패")??;

        if !matches {
            warn!("로그인 실패: 비밀번호 불일치 id={}", account.id);
            return Err(AppError::AuthenticationFailed);
        }

        let token = self.tokens.issue(&account.id, account.role.as_str())?;
        info!("로그인 성공: id={}", account.id);

        Ok(IssuedToken::bearer(token))
    }

    /// 토큰 주체의 최신 계정 정보를 조회합니다.
    ///
    /// 토큰 발급 이후 삭제된 계정이면 `NotFound`입니다.
    pub async fn profile(&self, claims: &Claims) -> AppResult<AccountSummary> {
        let account = self.repo.find_by_id(&claims.sub).await?;
        Ok(account.summary())
    }

    pub async fn list_accounts(&self) -> AppResult<Vec<AccountSummary>> {
        self.repo.list().await
    }

    /// 관리자 역할 변경
    ///
    /// 이미 발급된 토큰의 `role` 클레임은 만료 전까지 바뀌지 않습니다.
    pub async fn change_role(&self, id: &AccountId, role: Role) -> AppResult<AccountSummary> {
        let summary = self.repo.update_role(id, role).await?;
        info!("역할 변경: id={} role={}", id, role);
        Ok(summary)
    }

    /// 본인 계정의 프로필 이미지 경로를 기록합니다.
    pub async fn set_profile_image(
        &self,
        claims: &Claims,
        request: UpdateProfileImageRequest,
    ) -> AppResult<AccountSummary> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        self.repo
            .update_profile_image(&claims.sub, &request.profile_image_path)
            .await
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let passwords = self.passwords;
        web::block(move || passwords.hash(&password))
            .await
            .context("비밀번호 해싱 작업 실패")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JwtConfig, PasswordConfig};
    use crate::repositories::accounts::MemoryAccountRepository;
    use crate::services::notifications::WelcomeMessage;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;
    use tokio::sync::mpsc;

    struct Fixture {
        service: AccountService,
        repo: Arc<MemoryAccountRepository>,
        tokens: Arc<TokenService>,
        welcome: mpsc::Receiver<WelcomeMessage>,
    }

    fn fixture_with_role(default_role: Role) -> Fixture {
        let repo = Arc::new(MemoryAccountRepository::new());
        let tokens = Arc::new(TokenService::new(&JwtConfig::with_secret(
            "account-service-test-secret-0123456789",
        )));
        let (dispatcher, welcome) = WelcomeDispatcher::channel(8);

        let service = AccountService::new(
            repo.clone(),
            PasswordService::new(PasswordConfig { bcrypt_cost: 4 }),
            tokens.clone(),
            dispatcher,
            AccountConfig { default_role },
        );

        Fixture {
            service,
            repo,
            tokens,
            welcome,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_role(Role::User)
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn body_of(err: AppError) -> Vec<u8> {
        to_bytes(err.error_response().into_body())
            .await
            .unwrap()
            .to_vec()
    }

    #[actix_web::test]
    async fn test_register_then_login_issues_token_for_created_account() {
        let fx = fixture();

        let registered = fx
            .service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(registered.email, "a@x.com");

        let issued = fx
            .service
            .login(login_request("a@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 86_400);

        let claims = fx.tokens.validate(&issued.token).unwrap();
        assert_eq!(claims.sub, registered.id);
        assert_eq!(claims.role, "user");
    }

    #[actix_web::test]
    async fn test_register_queues_welcome_notification() {
        let mut fx = fixture();

        fx.service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();

        let message = fx.welcome.try_recv().unwrap();
        assert_eq!(message.to, "a@x.com");
    }

    #[actix_web::test]
    async fn test_register_succeeds_when_notification_worker_is_gone() {
        let fx = fixture();
        drop(fx.welcome);

        let result = fx
            .service
            .register(register_request("a@x.com", "secret1"))
            .await;

        assert!(result.is_ok());
        assert_eq!(fx.repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_register_stores_hash_and_default_role() {
        let fx = fixture_with_role(Role::Admin);

        fx.service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();

        let stored = fx.repo.find_by_email("a@x.com").await.unwrap();
        assert_ne!(stored.password_hash, "secret1");
        assert!(stored.password_hash.starts_with("$2"));
        assert_eq!(stored.role, Role::Admin);
    }

    #[actix_web::test]
    async fn test_duplicate_registration_is_rejected() {
        let fx = fixture();

        fx.service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();
        let second = fx
            .service
            .register(register_request("a@x.com", "another1"))
            .await;

        assert!(matches!(second, Err(AppError::DuplicateAccount)));
        assert_eq!(fx.repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_concurrent_duplicate_registration_creates_one_account() {
        let fx = fixture();

        let (first, second) = futures_util::future::join(
            fx.service.register(register_request("a@x.com", "secret1")),
            fx.service.register(register_request("a@x.com", "secret2")),
        )
        .await;

        let successes = [first.is_ok(), second.is_ok()]
            .iter()
            .filter(|ok| **ok)
            .count();
        assert_eq!(successes, 1);
        assert!(matches!(
            first.err().or(second.err()),
            Some(AppError::DuplicateAccount)
        ));
        assert_eq!(fx.repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_login_failures_are_indistinguishable() {
        let fx = fixture();
        fx.service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();

        let unknown = fx
            .service
            .login(login_request("nobody@x.com", "secret1"))
            .await
            .unwrap_err();
        let wrong = fx
            .service
            .login(login_request("a@x.com", "wrong-password"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, AppError::AuthenticationFailed));
        assert!(matches!(wrong, AppError::AuthenticationFailed));
        assert_eq!(body_of(unknown).await, body_of(wrong).await);
    }

    #[actix_web::test]
    async fn test_register_validation_errors() {
        let fx = fixture();

        let bad_email = fx
            .service
            .register(register_request("not-an-email", "secret1"))
            .await;
        let short_password = fx
            .service
            .register(register_request("a@x.com", "12345"))
            .await;

        assert!(matches!(bad_email, Err(AppError::ValidationError(_))));
        assert!(matches!(short_password, Err(AppError::ValidationError(_))));
        assert_eq!(fx.repo.len(), 0);
    }

    #[actix_web::test]
    async fn test_password_over_bcrypt_limit_is_rejected() {
        let fx = fixture();
        let prefix = "a".repeat(72);

        let too_long = fx
            .service
            .register(register_request("a@x.com", &format!("{}X", prefix)))
            .await;
        assert!(matches!(too_long, Err(AppError::ValidationError(_))));
        assert_eq!(fx.repo.len(), 0);

        fx.service
            .register(register_request("a@x.com", &prefix))
            .await
            .unwrap();
        let extended = fx
            .service
            .login(login_request("a@x.com", &format!("{}Y", prefix)))
            .await;
        assert!(extended.is_err());
        assert!(fx.service.login(login_request("a@x.com", &prefix)).await.is_ok());
    }

    #[actix_web::test]
    async fn test_profile_reads_current_account_state() {
        let fx = fixture();
        let registered = fx
            .service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();
        let issued = fx
            .service
            .login(login_request("a@x.com", "secret1"))
            .await
            .unwrap();
        let claims = fx.tokens.validate(&issued.token).unwrap();

        fx.service
            .change_role(&registered.id, Role::Admin)
            .await
            .unwrap();
        let profile = fx.service.profile(&claims).await.unwrap();

        assert_eq!(profile.id, registered.id);
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.role, Role::Admin);
        // 발급된 토큰의 역할은 그대로
        assert_eq!(claims.role, "user");
    }

    #[actix_web::test]
    async fn test_change_role_of_unknown_account_is_not_found() {
        let fx = fixture();

        let result = fx
            .service
            .change_role(&AccountId::Numeric(999), Role::Admin)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_set_profile_image_validates_path() {
        let fx = fixture();
        let registered = fx
            .service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();
        let claims = Claims {
            sub: registered.id,
            role: "user".to_string(),
            iat: 0,
            exp: 86_400,
        };

        let rejected = fx
            .service
            .set_profile_image(
                &claims,
                UpdateProfileImageRequest {
                    profile_image_path: "/etc/passwd".to_string(),
                },
            )
            .await;
        assert!(matches!(rejected, Err(AppError::ValidationError(_))));

        let updated = fx
            .service
            .set_profile_image(
                &claims,
                UpdateProfileImageRequest {
                    profile_image_path: "/static/avatar.png".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.profile_image_path.as_deref(), Some("/static/avatar.png"));
    }

    #[actix_web::test]
    async fn test_list_accounts_has_no_password_hashes() {
        let fx = fixture();
        fx.service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();
        fx.service
            .register(register_request("b@x.com", "secret2"))
            .await
            .unwrap();

        let accounts = fx.service.list_accounts().await.unwrap();
        let json = serde_json::to_string(&accounts).unwrap();

        assert_eq!(accounts.len(), 2);
        assert!(!json.contains("$2"));
    }
}
