//! 사용자 생성 요청 DTO
//!
//! 새로운 사용자 계정 생성을 위한 요청 데이터 구조를 정의합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::config::UserRole;
use crate::utils::string_utils::deserialize_optional_string;

/// 새로운 사용자 계정 생성을 위한 요청 DTO
///
/// 검증 규칙은 Access Boundary가 `.validate()`로 실행합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// 사용자명 (4-20자, 시스템 전체에서 유니크)
    #[validate(length(
        min = 4,
        max = 20,
        message = "사용자명은 4-20자 사이여야 합니다"
    ))]
    pub username: String,

    /// 사용자 이메일 주소 (RFC 5322 표준, 시스템 전체에서 유니크)
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 계정 비밀번호 (최소 8자, 평문은 해싱 후 즉시 폐기됨)
    #[validate(length(
        min = 8,
        message = "비밀번호는 최소 8자 이상이어야 합니다"
    ))]
    pub password: String,

    /// 사용자 역할 (admin / author / reader)
    pub role: UserRole,

    /// 표시 직함 (선택사항, 빈 문자열은 None으로 정리됨)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_optional_title() {
        let json = r#"{
            "username": "alice_kim",
            "email": "alice@example.com",
            "password": "password1234",
            "role": "author",
            "title": "  수석 에디터  "
        }"#;

        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.role, UserRole::Author);
        assert_eq!(request.title, Some("수석 에디터".to_string()));

        let json = r#"{
            "username": "bob_lee",
            "email": "bob@example.com",
            "password": "password1234",
            "role": "reader"
        }"#;

        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, None);
    }

    #[test]
    fn test_validation_rules_ride_on_the_dto() {
        // 경계 계층이 실행할 규칙이 올바르게 선언되어 있는지 확인
        let request = CreateUserRequest {
            username: "abc".to_string(), // 4자 미만
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            role: UserRole::Reader,
            title: None,
        };
        assert!(request.validate().is_err());

        let request = CreateUserRequest {
            username: "alice_kim".to_string(),
            email: "alice@example.com".to_string(),
            password: "password1234".to_string(),
            role: UserRole::Reader,
            title: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unknown_role_is_rejected_at_deserialization() {
        let json = r#"{
            "username": "eve_park",
            "email": "eve@example.com",
            "password": "password1234",
            "role": "superuser"
        }"#;

        assert!(serde_json::from_str::<CreateUserRequest>(json).is_err());
    }
}
