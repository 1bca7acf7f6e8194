//! Database Connection Management Module
//!
//! 계정 저장소가 사용하는 연결 핸들을 생성합니다.
//! 프로세스는 `STORAGE_BACKEND` 설정에 따라 둘 중 하나만 연결합니다.
//!
//! - [`Database`] - MongoDB 클라이언트와 데이터베이스 이름 래퍼
//! - [`connect_postgres`] - sqlx Postgres 연결 풀
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::{connect_postgres, Database};
//!
//! let pool = connect_postgres(&config.storage).await?;
//! let database = Database::connect(&config.storage).await?;
//! ```
//!
//! 연결에 실패하면 호출자(`main`)는 기동을 중단합니다.

use log::info;
use mongodb::{options::ClientOptions, Client};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::StorageConfig;
use crate::errors::AppError;

/// MongoDB 데이터베이스 연결 래퍼
///
/// 클라이언트는 내부적으로 연결 풀을 가지므로 복제해서 공유합니다.
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 새 MongoDB 데이터베이스 연결을 생성하고 `ping`으로 연결을 확인합니다.
    ///
    /// ## 설정
    /// - `MONGODB_URI`: MongoDB 연결 URI
    /// - `MONGODB_DATABASE`: 데이터베이스 이름
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - URI 파싱 실패 또는 서버 응답 없음
    pub async fn connect(config: &StorageConfig) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri)
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB URI 파싱 실패: {}", e)))?;

        // 애플리케이션 이름 설정 (서버 측 모니터링용)
        client_options.app_name = Some("account_service".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 연결 테스트
        client
            .database(&config.mongodb_database)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?;

        info!("✅ MongoDB 연결 성공: {}", config.mongodb_database);

        Ok(Self {
            client,
            database_name: config.mongodb_database.clone(),
        })
    }

    /// 리포지토리에서 컬렉션에 접근할 때 사용하는 데이터베이스 핸들
    ///
    /// ```rust,ignore
    /// let accounts = database.get_database().collection::<AccountDocument>("accounts");
    /// ```
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}

/// Postgres 연결 풀을 생성합니다.
///
/// 풀 생성 시점에 첫 연결을 맺으므로 서버에 닿지 않으면 여기서 실패합니다.
///
/// # Errors
///
/// * `AppError::DatabaseError` - 연결 실패
pub async fn connect_postgres(config: &StorageConfig) -> Result<PgPool, AppError> {
    info!("Postgres 연결 중... (max_connections={})", config.max_connections);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Postgres 연결 실패: {}", e)))?;

    info!("✅ Postgres 연결 성공");

    Ok(pool)
}
