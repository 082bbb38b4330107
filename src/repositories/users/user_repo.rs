//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **자동 의존성 주입**: 싱글톤 매크로를 통한 DI
//! - **데이터 무결성**: 유니크 인덱스가 사용자명/이메일 중복을 쓰기 시점에 차단
//! - **소프트 삭제 전용**: 사용자 문서는 물리적으로 삭제되지 않음

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    config::UserRole,
    core::registry::Repository,
    db::Database,
    domain::dto::users::response::role_stats_response::RoleCount,
    domain::entities::users::user::User,
    utils::password::{hash_password, verify_password},
};
use singleton_macro::repository;
use crate::core::errors::AppError;

/// 한 페이지 분량의 사용자 목록과 집계 정보
#[derive(Debug)]
pub struct UserPage {
    /// 생성일 역순으로 정렬된 사용자들
    pub users: Vec<User>,
    /// 필터 조건에 일치하는 전체 사용자 수
    pub total: u64,
    /// 현재 페이지 (1-based)
    pub page: i64,
    /// 전체 페이지 수
    pub total_pages: u64,
}

/// MongoDB 중복 키 에러(코드 11000) 여부 확인
///
/// 애플리케이션 레벨의 사전 중복 검사는 동시 요청 간 원자적이지 않으므로,
/// 경합의 최종 판정은 유니크 인덱스가 내립니다. 이 함수가 그 판정 결과를
/// `ConflictError`로 번역할 수 있게 해줍니다.
fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

/// 전체 페이지 수 계산 (ceil(total / limit))
fn total_pages(total: u64, limit: i64) -> u64 {
    if limit <= 0 {
        return 0;
    }
    total.div_ceil(limit as u64)
}

/// 사용자 데이터 액세스 리포지토리
///
/// 사용자 엔티티의 영속화 연산을 담당하며, MongoDB 컬렉션과
/// Redis 캐시를 통합하여 최적화된 데이터 액세스를 제공합니다.
///
/// ## 캐싱 전략
///
/// ### L1 Cache (Redis)
/// - **TTL**: 10분 (600초)
/// - **키 패턴**:
///   - 개별 사용자: `user:{user_id}`
///   - 이메일 조회: `user:email:{email}`
///   - 컬렉션 메타: `userrepository:collection`
///
/// ### L2 Storage (MongoDB)
/// - **컬렉션명**: `users`
/// - **인덱스**: username(unique), email(unique), created_at(desc)
///
/// 사용자명 조회(`find_by_username`)는 인증 경로에서 사용되므로
/// 캐싱하지 않고 항상 저장소의 최신 해시를 읽습니다.
/// 모든 쓰기 연산은 관련 캐시 키를 무효화합니다.
///
/// ## 에러 처리
///
/// 모든 메서드는 `Result<T, AppError>` 타입을 반환합니다:
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ValidationError**: 잘못된 ObjectId 형식 등 입력값 검증 오류
/// - **ConflictError**: 이메일/사용자명 중복 (유니크 인덱스 위반)
/// - **NotFound**: 대상 ID가 존재하지 않는 쓰기 연산
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// ID로 사용자 조회
    ///
    /// 가장 빈번한 조회 패턴이므로 캐시 우선 조회를 적용합니다.
    ///
    /// # 인자
    ///
    /// * `id` - MongoDB ObjectId의 16진수 문자열 표현
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우 (에러가 아님)
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        // 캐시 확인
        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        // DB 조회
        let user = self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 저장 (10분)
        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// 사용자명으로 사용자 조회
    ///
    /// 사용자명은 시스템 전체에서 유니크하므로 최대 1개의 결과만 반환됩니다.
    /// 인증 경로에서 사용되므로 캐싱하지 않고 항상 저장소를 직접 읽습니다.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 이메일 주소로 사용자 조회
    ///
    /// 캐시 우선 조회를 통해 성능을 최적화합니다.
    ///
    /// # 캐싱 정책
    ///
    /// - **캐시 키**: `user:email:{email}`
    /// - **TTL**: 600초 (10분)
    /// - **캐시 미스**: MongoDB에서 조회 후 캐시에 저장
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = format!("user:email:{}", email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// 역할로 사용자 조회 (첫 번째 일치 항목)
    ///
    /// 단일 문서 포인트 조회입니다. 역할별 "목록"이 필요한 경우에는
    /// [`find_all_with_pagination`](Self::find_all_with_pagination)의
    /// 역할 필터를 사용하세요.
    pub async fn find_by_role(&self, role: &UserRole) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "role": role.as_str() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// 전달된 엔티티의 `password_hash`는 호출 측에서 이미 해싱된 값이어야 합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (할당된 ID 포함)
    /// * `Err(AppError::ConflictError)` - 이메일 또는 사용자명 중복
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// # 동시성
    ///
    /// 서비스 계층의 중복 사전 검사는 어디까지나 사전 안내용입니다.
    /// 동일한 사용자명/이메일을 동시에 선점하려는 요청들 사이의 최종 판정은
    /// 유니크 인덱스가 내리며, 패배한 쪽의 중복 키 에러(11000)가
    /// `ConflictError`로 변환됩니다. 정확히 한 요청만 성공합니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 사용 중인 사용자명 또는 이메일입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        user.id = result.inserted_id.as_object_id();

        // 컬렉션 캐시 무효화
        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 사용자 정보 부분 업데이트
    ///
    /// 지정된 필드들만 `$set`으로 병합하고 `updated_at`을 갱신한 후
    /// 최신 사용자 문서를 반환합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 업데이트된 사용자 정보
    /// * `Ok(None)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn update(&self, id: &str, mut update_doc: Document) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        update_doc.insert("updated_at", DateTime::now());

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": update_doc },
            )
            .with_options(options)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 사용 중인 사용자명 또는 이메일입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        // 캐시 무효화 (이메일 키 포함)
        if let Some(ref user) = updated_user {
            self.invalidate_user_cache(id, &user.email).await;
        }

        Ok(updated_user)
    }

    /// 리프레시 토큰 덮어쓰기
    ///
    /// 토큰은 통째로 교체되며 이전 값의 이력은 보관하지 않습니다.
    /// `None`을 전달하면 저장된 토큰이 제거됩니다 (로그아웃).
    ///
    /// # 반환값
    ///
    /// * `Ok(())` - 저장 성공
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn update_refresh_token(&self, id: &str, refresh_token: Option<&str>) -> Result<(), AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let update = match refresh_token {
            Some(token) => doc! {
                "$set": { "refresh_token": token, "updated_at": DateTime::now() }
            },
            None => doc! {
                "$set": { "updated_at": DateTime::now() },
                "$unset": { "refresh_token": "" }
            },
        };

        let result = self.collection::<User>()
            .update_one(doc! { "_id": object_id }, update)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        let _ = self.invalidate_cache(id).await;

        Ok(())
    }

    /// 비밀번호 변경
    ///
    /// 저장된 최신 해시와 대조해야 하므로 캐시를 거치지 않고
    /// MongoDB에서 직접 읽습니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(true)` - 현재 비밀번호 일치, 새 해시로 교체 완료
    /// * `Ok(false)` - 현재 비밀번호 불일치 (저장된 해시는 변경되지 않음)
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn change_password(
        &self,
        id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<bool, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        // 캐시 우회 - 항상 저장소의 최신 해시와 대조
        let user = self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        if !verify_password(current_password, &user.password_hash)? {
            return Ok(false);
        }

        let new_hash = hash_password(new_password)?;

        self.collection::<User>()
            .update_one(
                doc! { "_id": object_id },
                doc! { "$set": { "password_hash": new_hash, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.invalidate_user_cache(id, &user.email).await;

        Ok(true)
    }

    /// 사용자 소프트 삭제
    ///
    /// `is_active`를 false로, `deleted_at`을 현재 시각으로
    /// 하나의 원자적 업데이트로 설정합니다. 문서는 컬렉션에 남습니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 삭제 처리된 사용자 (최신 상태)
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn soft_delete(&self, id: &str) -> Result<User, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let now = DateTime::now();
        let user = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": { "is_active": false, "deleted_at": now, "updated_at": now } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        self.invalidate_user_cache(id, &user.email).await;
        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 소프트 삭제된 사용자 복구
    ///
    /// `is_active`를 true로 되돌리고 `deleted_at`을 제거합니다.
    pub async fn restore(&self, id: &str) -> Result<User, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let user = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! {
                    "$set": { "is_active": true, "updated_at": DateTime::now() },
                    "$unset": { "deleted_at": "" }
                },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        self.invalidate_user_cache(id, &user.email).await;
        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 이메일 사용 여부 확인
    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let count = self.collection::<User>()
            .count_documents(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }

    /// 사용자명 사용 여부 확인
    pub async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let count = self.collection::<User>()
            .count_documents(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }

    /// 페이지네이션 기반 사용자 목록 조회
    ///
    /// 생성일 역순으로 정렬된 한 페이지를 반환합니다.
    /// 소프트 삭제된 사용자도 목록에 포함됩니다.
    ///
    /// # 인자
    ///
    /// * `page` - 1-based 페이지 번호
    /// * `limit` - 페이지 크기 (상한은 호출/검증 계층이 보장)
    /// * `search` - 사용자명 OR 이메일 대소문자 무관 부분 일치 검색어
    /// * `role` - 역할 필터
    ///
    /// # 반환값
    ///
    /// 사용자 목록, 전체 건수, 전체 페이지 수를 담은 [`UserPage`]
    pub async fn find_all_with_pagination(
        &self,
        page: i64,
        limit: i64,
        search: Option<&str>,
        role: Option<&UserRole>,
    ) -> Result<UserPage, AppError> {
        let mut filter = doc! {};

        if let Some(term) = search {
            filter.insert(
                "$or",
                vec![
                    doc! { "username": { "$regex": term, "$options": "i" } },
                    doc! { "email": { "$regex": term, "$options": "i" } },
                ],
            );
        }

        if let Some(role) = role {
            filter.insert("role", role.as_str());
        }

        let skip = ((page - 1).max(0) * limit.max(0)) as u64;

        // 목록 조회와 전체 건수 집계를 병렬 수행
        let users_future = async {
            self.collection::<User>()
                .find(filter.clone())
                .sort(doc! { "created_at": -1 })
                .skip(skip)
                .limit(limit)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?
                .try_collect::<Vec<User>>()
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))
        };

        let total_future = async {
            self.collection::<User>()
                .count_documents(filter.clone())
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))
        };

        let (users, total) = futures_util::try_join!(users_future, total_future)?;

        Ok(UserPage {
            users,
            total,
            page,
            total_pages: total_pages(total, limit),
        })
    }

    /// 역할 일괄 변경
    ///
    /// 전달된 ID 집합에 대해 하나의 `update_many`로 역할을 설정합니다.
    /// 존재하지 않거나 형식이 잘못된 ID는 에러 없이 건너뜁니다.
    ///
    /// # 반환값
    ///
    /// 실제로 변경된 문서 수
    pub async fn bulk_update_role(&self, ids: &[String], role: &UserRole) -> Result<u64, AppError> {
        let object_ids: Vec<ObjectId> = ids
            .iter()
            .filter_map(|id| ObjectId::parse_str(id).ok())
            .collect();

        if object_ids.is_empty() {
            return Ok(0);
        }

        let result = self.collection::<User>()
            .update_many(
                doc! { "_id": { "$in": object_ids } },
                doc! { "$set": { "role": role.as_str(), "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 대상 계정들의 개별 캐시와 컬렉션 캐시 무효화
        let keys: Vec<String> = ids.iter().map(|id| self.cache_key(id)).collect();
        let _ = self.redis.del_multiple(&keys).await;
        let _ = self.invalidate_collection_cache(None).await;

        Ok(result.modified_count)
    }

    /// 역할별 사용자 수 집계
    ///
    /// 관리자 대시보드용 통계입니다.
    ///
    /// 파이프라인: `$group{_id: "$role", count: {$sum: 1}}` →
    /// `$project{role: "$_id", count: 1}`
    pub async fn stats_by_role(&self) -> Result<Vec<RoleCount>, AppError> {
        let pipeline = vec![
            doc! { "$group": { "_id": "$role", "count": { "$sum": 1 } } },
            doc! { "$project": { "role": "$_id", "count": 1, "_id": 0 } },
        ];

        let mut cursor = self.collection::<User>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut stats = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            let stat: RoleCount = mongodb::bson::from_document(document)
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
            stats.push(stat);
        }

        Ok(stats)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    ///
    /// 1. `username` 유니크 인덱스 - 중복 사용자명 차단 및 인증 조회 최적화
    /// 2. `email` 유니크 인덱스 - 중복 이메일 차단
    /// 3. `created_at` 내림차순 인덱스 - 최신순 목록 조회 최적화
    ///
    /// 유니크 인덱스는 동시 가입 경합의 최종 심판입니다.
    /// 기존 데이터에 중복이 있는 경우 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        // 사용자명 유니크 인덱스
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        // 이메일 유니크 인덱스
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([username_index, email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 개별 사용자 관련 캐시 키 일괄 무효화
    ///
    /// ID 키와 이메일 키를 함께 제거합니다. 캐시 무효화 실패는
    /// TTL이 만료를 보장하므로 연산 실패로 승격하지 않습니다.
    async fn invalidate_user_cache(&self, id: &str, email: &str) {
        let _ = self.invalidate_cache(id).await;
        let _ = self.redis.del(&format!("user:email:{}", email)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(31, 10), 4);
        assert_eq!(total_pages(1, 10), 1);
    }

    #[test]
    fn test_total_pages_empty_collection() {
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_total_pages_degenerate_limit() {
        assert_eq!(total_pages(10, 0), 0);
        assert_eq!(total_pages(10, -5), 0);
    }
}
