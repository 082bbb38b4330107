//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 역할 기반 권한, 소프트 삭제 상태, 리프레시 토큰을 포함한
//! 통합된 사용자 모델을 제공합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::UserRole;

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 이 서브시스템에서 사용자는 물리적으로 삭제되지 않으며,
/// `is_active` / `deleted_at` 쌍으로 소프트 삭제 상태를 표현합니다.
/// `deleted_at`은 `is_active`가 false인 경우에만 값을 가집니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자명 (unique)
    pub username: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 해시된 비밀번호. 평문은 절대 저장되지 않으며,
    /// 외부로 나가는 뷰([`UserResponse`](crate::domain::dto::users::response::user_response::UserResponse))에는 포함되지 않음
    pub password_hash: String,
    /// 사용자 역할
    pub role: UserRole,
    /// 표시 직함
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 계정 활성화 여부 (소프트 삭제 시 false)
    pub is_active: bool,
    /// 소프트 삭제 시각 (활성 계정은 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
    /// 현재 리프레시 토큰. 갱신 시 통째로 덮어쓰며 이력은 없음
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 활성 상태로 시작하며 타임스탬프가 현재 시각으로 설정됩니다.
    /// `password_hash`는 호출 측에서 이미 해싱을 마친 값이어야 합니다.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        role: UserRole,
        title: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            email,
            password_hash,
            role,
            title,
            is_active: true,
            deleted_at: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 관리자 계정인지 확인
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// 소프트 삭제된 계정인지 확인
    pub fn is_deleted(&self) -> bool {
        !self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_active() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$04$hash".to_string(),
            UserRole::Reader,
            None,
        );

        assert!(user.is_active);
        assert!(user.deleted_at.is_none());
        assert!(user.refresh_token.is_none());
        assert!(user.id.is_none());
        assert_eq!(user.created_at, user.updated_at);
        assert!(!user.is_admin());
        assert!(!user.is_deleted());
    }

    #[test]
    fn test_role_is_persisted_as_lowercase_string() {
        let user = User::new(
            "bob".to_string(),
            "bob@example.com".to_string(),
            "$2b$04$hash".to_string(),
            UserRole::Author,
            Some("편집자".to_string()),
        );

        let doc = mongodb::bson::to_document(&user).unwrap();
        assert_eq!(doc.get_str("role").unwrap(), "author");
        // 아직 저장 전이므로 _id는 직렬화에서 제외됨
        assert!(!doc.contains_key("_id"));
    }
}
