//! # MongoDB 계정 리포지토리
//!
//! `accounts` 컬렉션에 계정 문서를 저장합니다.
//!
//! ## 특징
//!
//! - **식별자**: 드라이버가 생성한 ObjectId를 경계에서 24자리 16진수 문자열로 변환
//! - **타임스탬프**: `created_at`/`updated_at`은 리포지토리가 기록
//! - **중복 방지**: `email_unique` 인덱스의 duplicate key(11000)를 `DuplicateAccount`로 변환
//! - **목록 조회**: `password_hash`를 projection으로 제외

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::domain::entities::accounts::{Account, AccountId, AccountSummary, NewAccount, Role};
use crate::errors::{AppError, AppResult};

use super::AccountRepository;

/// 컬렉션 이름
pub const COLLECTION_NAME: &str = "accounts";

/// MongoDB duplicate key 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// `accounts` 컬렉션 문서
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    email: String,
    password_hash: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_image_path: Option<String>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl AccountDocument {
    fn into_account(self) -> AppResult<Account> {
        let id = self.id.ok_or_else(|| {
            AppError::DatabaseError("저장된 계정 문서에 _id가 없습니다".to_string())
        })?;

        Ok(Account {
            id: AccountId::Document(id.to_hex()),
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            profile_image_path: self.profile_image_path,
            created_at: to_chrono(self.created_at),
            updated_at: to_chrono(self.updated_at),
            deleted_at: None,
        })
    }
}

/// `password_hash`가 projection으로 빠진 문서
#[derive(Debug, Clone, Deserialize)]
struct SummaryDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    email: String,
    role: Role,
    #[serde(default)]
    profile_image_path: Option<String>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl From<SummaryDocument> for AccountSummary {
    fn from(document: SummaryDocument) -> Self {
        AccountSummary {
            id: AccountId::Document(document.id.to_hex()),
            email: document.email,
            role: document.role,
            profile_image_path: document.profile_image_path,
            created_at: to_chrono(document.created_at),
            updated_at: to_chrono(document.updated_at),
        }
    }
}

fn to_chrono(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// 문서 저장소는 ObjectId 형태의 식별자만 다룹니다.
fn object_id(id: &AccountId) -> Option<ObjectId> {
    match id {
        AccountId::Document(hex) => ObjectId::parse_str(hex).ok(),
        AccountId::Numeric(_) => None,
    }
}

fn summary_projection() -> Document {
    doc! { "password_hash": 0 }
}

fn not_found() -> AppError {
    AppError::NotFound("Account not found".to_string())
}

fn is_duplicate_key(e: &MongoError) -> bool {
    matches!(
        &*e.kind,
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE
    )
}

fn map_mongo_error(e: MongoError) -> AppError {
    if is_duplicate_key(&e) {
        return AppError::DuplicateAccount;
    }
    AppError::DatabaseError(e.to_string())
}

/// MongoDB 계정 리포지토리
#[derive(Clone)]
pub struct MongoAccountRepository {
    collection: Collection<AccountDocument>,
}

impl MongoAccountRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection(COLLECTION_NAME),
        }
    }

    fn summaries(&self) -> Collection<SummaryDocument> {
        self.collection.clone_with_type()
    }

    /// `email_unique` 인덱스를 생성합니다.
    ///
    /// 이미 같은 정의의 인덱스가 있으면 서버가 무시합니다.
    /// 기존 데이터에 중복 이메일이 있으면 실패합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_index(email_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("✅ accounts 컬렉션 인덱스 준비 완료");
        Ok(())
    }

    async fn update_one_field(&self, id: &AccountId, update: Document) -> AppResult<AccountSummary> {
        let object_id = object_id(id).ok_or_else(not_found)?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .projection(summary_projection())
            .build();

        let mut update = update;
        update.insert("updated_at", bson::DateTime::now());

        self.summaries()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": update })
            .with_options(options)
            .await
            .map_err(map_mongo_error)?
            .map(AccountSummary::from)
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl AccountRepository for MongoAccountRepository {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn create(&self, account: NewAccount) -> AppResult<AccountId> {
        let now = bson::DateTime::now();
        let document = AccountDocument {
            id: None,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            profile_image_path: None,
            created_at: now,
            updated_at: now,
        };

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(map_mongo_error)?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("삽입 결과에 ObjectId가 없습니다".to_string())
        })?;

        debug!("계정 생성: id={}", id.to_hex());
        Ok(AccountId::Document(id.to_hex()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Account> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(map_mongo_error)?
            .ok_or_else(not_found)?
            .into_account()
    }

    async fn find_by_id(&self, id: &AccountId) -> AppResult<Account> {
        let object_id = object_id(id).ok_or_else(not_found)?;

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(map_mongo_error)?
            .ok_or_else(not_found)?
            .into_account()
    }

    async fn list(&self) -> AppResult<Vec<AccountSummary>> {
        let cursor = self
            .summaries()
            .find(doc! {})
            .projection(summary_projection())
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(map_mongo_error)?;

        let documents: Vec<SummaryDocument> =
            cursor.try_collect().await.map_err(map_mongo_error)?;

        Ok(documents.into_iter().map(AccountSummary::from).collect())
    }

    async fn update_role(&self, id: &AccountId, role: Role) -> AppResult<AccountSummary> {
        self.update_one_field(id, doc! { "role": role.as_str() }).await
    }

    async fn update_profile_image(&self, id: &AccountId, path: &str) -> AppResult<AccountSummary> {
        self.update_one_field(id, doc! { "profile_image_path": path }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> AccountDocument {
        let now = bson::DateTime::from_millis(1_700_000_000_000);
        AccountDocument {
            id: Some(ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap()),
            email: "a@x.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::User,
            profile_image_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_document_maps_to_hex_id() {
        let account = document().into_account().unwrap();

        assert_eq!(
            account.id,
            AccountId::Document("507f1f77bcf86cd799439011".to_string())
        );
        assert_eq!(account.created_at.timestamp_millis(), 1_700_000_000_000);
        assert!(account.deleted_at.is_none());
    }

    #[test]
    fn test_new_document_lets_driver_mint_id() {
        let mut new_document = document();
        new_document.id = None;

        let bson_document = bson::to_document(&new_document).unwrap();

        assert!(!bson_document.contains_key("_id"));
        assert!(!bson_document.contains_key("profile_image_path"));
        assert_eq!(bson_document.get_str("role").unwrap(), "user");
    }

    #[test]
    fn test_object_id_rejects_other_shapes() {
        assert!(object_id(&AccountId::Numeric(1)).is_none());
        assert!(object_id(&AccountId::Document("not-hex".to_string())).is_none());
        assert!(object_id(&AccountId::Document("507f1f77bcf86cd799439011".to_string())).is_some());
    }

    #[test]
    fn test_summary_document_without_password_hash() {
        let raw = doc! {
            "_id": ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap(),
            "email": "a@x.com",
            "role": "admin",
            "created_at": bson::DateTime::from_millis(0),
            "updated_at": bson::DateTime::from_millis(0),
        };

        let summary: AccountSummary = bson::from_document::<SummaryDocument>(raw).unwrap().into();

        assert_eq!(summary.role, Role::Admin);
        assert!(summary.profile_image_path.is_none());
        assert_eq!(summary_projection().get_i32("password_hash").unwrap(), 0);
    }
}
