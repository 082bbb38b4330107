use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::config::UserRole;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::token::TokenPair;

/// 사용자 응답 DTO
///
/// 외부로 공개되는 사용자 뷰. `password_hash`와 `refresh_token` 필드는
/// 구조체에 존재하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,

    /// 사용자 역할 (admin / author / reader)
    pub role: UserRole,

    /// 표시 직함
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub is_active: bool,

    /// 소프트 삭제 시각 (활성 계정은 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            email,
            role,
            title,
            is_active,
            deleted_at,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            email,
            role,
            title,
            is_active,
            deleted_at,
            created_at,
            updated_at,
        }
    }
}

/// 사용자 생성 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: UserResponse,
    pub message: String,
}

/// 로그인 응답 DTO (JWT 토큰 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,

    /// 리프레시 토큰 (선택사항)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl LoginResponse {
    /// 발급된 토큰 쌍으로부터 로그인 응답 생성
    pub fn new(user: UserResponse, tokens: TokenPair) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in,
            refresh_token: tokens.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut user = User::new(
            "alice_kim".to_string(),
            "alice@example.com".to_string(),
            "$2b$12$secret-hash".to_string(),
            UserRole::Author,
            Some("수석 에디터".to_string()),
        );
        user.refresh_token = Some("refresh-token-value".to_string());
        user
    }

    #[test]
    fn test_view_strips_sensitive_fields() {
        let response = UserResponse::from(sample_user());
        let json = serde_json::to_string(&response).unwrap();

        // 민감 필드는 뷰의 직렬화 결과 어디에도 존재하지 않음
        assert!(!json.contains("password"));
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("refresh_token"));
        assert!(!json.contains("refresh-token-value"));

        assert!(json.contains("alice_kim"));
        assert!(json.contains("\"role\":\"author\""));
    }

    #[test]
    fn test_view_preserves_soft_delete_state() {
        let mut user = sample_user();
        user.is_active = false;
        user.deleted_at = Some(DateTime::now());

        let response = UserResponse::from(user);
        assert!(!response.is_active);
        assert!(response.deleted_at.is_some());
    }

    #[test]
    fn test_unsaved_user_maps_to_empty_id() {
        // 저장 전(id 미할당) 엔티티는 빈 문자열 ID로 변환됨
        let response = UserResponse::from(sample_user());
        assert_eq!(response.id, "");
    }
}
