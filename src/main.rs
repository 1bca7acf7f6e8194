//! 계정 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! 설정된 저장소(Postgres 또는 MongoDB) 하나에 연결하고 JWT 인증 기반의 REST API를 제공합니다.

use std::sync::Arc;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use account_service::config::{AppConfig, StorageBackend, StorageConfig};
use account_service::db::{connect_postgres, Database};
use account_service::errors::AppError;
use account_service::repositories::accounts::{
    AccountRepository, MongoAccountRepository, PgAccountRepository,
};
use account_service::routes::configure_all_routes;
use account_service::services::accounts::AccountService;
use account_service::services::auth::{PasswordService, TokenService};
use account_service::services::notifications::{LogMailer, WelcomeDispatcher};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 계정 인증 서비스 시작중...");

    let config = AppConfig::from_env().map_err(|e| {
        error!("설정 로드 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!("환경: {:?}, 저장소: {:?}", config.environment, config.storage.backend);

    // 저장소 초기화 (실패 시 기동 중단)
    let repo = initialize_repository(&config.storage).await.map_err(|e| {
        error!("저장소 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    // 환영 알림 워커는 서버 수명 동안 유지
    let notifications = WelcomeDispatcher::spawn(config.notification, Arc::new(LogMailer));

    let tokens = Arc::new(TokenService::new(&config.jwt));
    let passwords = PasswordService::new(config.password);
    let accounts = web::Data::new(AccountService::new(
        repo,
        passwords,
        tokens.clone(),
        notifications,
        config.account,
    ));

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(&config, web::Data::from(tokens), accounts).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate limiting, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패, 잘못된 rate limit 설정 또는 서버 실행 오류
async fn start_http_server(
    config: &AppConfig,
    tokens: web::Data<TokenService>,
    accounts: web::Data<AccountService>,
) -> std::io::Result<()> {
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1", bind_address);

    // Rate Limiting 설정
    let rate_limit = &config.rate_limit;
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            error!("Rate limit 설정이 올바르지 않습니다: {:?}", rate_limit);
            std::io::Error::other("invalid rate limit configuration")
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second,
        rate_limit.burst_size
    );

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 공유 서비스
            .app_data(tokens.clone())
            .app_data(accounts.clone())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4) // 워커 스레드 수
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => eprintln!(".env.prod 파일 로드 됨"),
            Err(e) => eprintln!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => eprintln!(".env.dev 파일 로드 됨"),
            Err(e) => eprintln!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=account_service::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 설정된 백엔드 하나만 연결하고 스키마/인덱스를 준비합니다
///
/// # Errors
///
/// * `AppError::DatabaseError` - 연결, 마이그레이션 또는 인덱스 생성 실패
async fn initialize_repository(
    storage: &StorageConfig,
) -> Result<Arc<dyn AccountRepository>, AppError> {
    info!("📡 데이터베이스 연결 중...");

    match storage.backend {
        StorageBackend::Postgres => {
            let pool = connect_postgres(storage).await?;
            let repo = PgAccountRepository::new(pool);
            repo.migrate().await?;
            Ok(Arc::new(repo))
        }
        StorageBackend::MongoDb => {
            let database = Database::connect(storage).await?;
            let repo = MongoAccountRepository::new(&database);
            repo.create_indexes().await?;
            Ok(Arc::new(repo))
        }
    }
}
