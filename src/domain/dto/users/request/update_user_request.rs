//! 프로필 수정 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 프로필 부분 수정 요청 DTO
///
/// 포함된 필드만 병합됩니다. 사용자명/이메일이 실제로 변경되는 경우
/// 서비스 계층이 유니크 제약을 재확인합니다.
/// 비밀번호는 이 DTO로 변경할 수 없으며 별도의 비밀번호 변경 경로를 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// 새 사용자명 (4-20자)
    #[validate(length(
        min = 4,
        max = 20,
        message = "사용자명은 4-20자 사이여야 합니다"
    ))]
    pub username: Option<String>,

    /// 새 이메일 주소
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    /// 새 표시 직함 (빈 문자열은 None으로 정리됨)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
}

impl UpdateUserRequest {
    /// 변경할 필드가 하나도 없는 요청인지 확인
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.title.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_patch_deserialization() {
        let request: UpdateUserRequest = serde_json::from_str(r#"{"email": "new@example.com"}"#).unwrap();
        assert_eq!(request.email, Some("new@example.com".to_string()));
        assert_eq!(request.username, None);
        assert!(!request.is_empty());

        let request: UpdateUserRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(request.is_empty());
    }

    #[test]
    fn test_option_fields_validate_inner_value() {
        let request = UpdateUserRequest {
            username: Some("ab".to_string()),
            email: None,
            title: None,
        };
        assert!(request.validate().is_err());

        let request = UpdateUserRequest {
            username: Some("valid_name".to_string()),
            email: Some("ok@example.com".to_string()),
            title: Some("기자".to_string()),
        };
        assert!(request.validate().is_ok());
    }
}
