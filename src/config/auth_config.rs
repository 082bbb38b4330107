//! 인증 관련 설정 관리 모듈
//!
//! JWT 서명/만료 설정과 사용자 역할 열거형을 관리합니다.

use std::env;

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 환경 변수가 설정되지 않은 경우 개발용 기본값을 사용하며,
    /// 프로덕션에서 기본값 사용 시 경고 로그를 출력합니다.
    ///
    /// ```bash
    /// export JWT_SECRET="your-super-secret-256-bit-key-generated-securely"
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// JWT 액세스 토큰의 만료 시간을 시간 단위로 반환합니다.
    ///
    /// 기본값: 24시간. `JWT_EXPIRATION_HOURS` 환경 변수로 재정의 가능합니다.
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }

    /// JWT 리프레시 토큰의 만료 시간을 일 단위로 반환합니다.
    ///
    /// 기본값: 7일. `JWT_REFRESH_EXPIRATION_DAYS` 환경 변수로 재정의 가능합니다.
    /// 리프레시 토큰은 사용자 문서에 통째로 덮어쓰기 방식으로 저장되며
    /// 이력은 보관하지 않습니다.
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7)
    }
}

/// 사용자 역할
///
/// 시스템 전체에서 단 한 곳에 정의되는 역할 열거형입니다.
/// 저장소, 토큰 클레임, DTO, 권한 검사가 모두 이 타입을 공유하며,
/// 세 가지 값 외의 역할은 직렬화 단계에서 거부됩니다.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// 관리자 - 모든 계정에 대한 관리 작업 가능
    Admin,

    /// 작성자 - 콘텐츠 작성 권한
    Author,

    /// 독자 - 기본 역할
    Reader,
}

impl UserRole {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "author" => Ok(UserRole::Author),
            "reader" => Ok(UserRole::Reader),
            _ => Err(format!("Unsupported user role: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Author => "author",
            UserRole::Reader => "reader",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_string() {
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::from_str("author").unwrap(), UserRole::Author);
        assert_eq!(UserRole::from_str("reader").unwrap(), UserRole::Reader);

        // 대소문자 무관 테스트
        assert_eq!(UserRole::from_str("ADMIN").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::from_str("Reader").unwrap(), UserRole::Reader);

        // 지원하지 않는 역할 테스트
        assert!(UserRole::from_str("moderator").is_err());
        assert!(UserRole::from_str("").is_err());
    }

    #[test]
    fn test_user_role_as_string() {
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert_eq!(UserRole::Author.as_str(), "author");
        assert_eq!(UserRole::Reader.as_str(), "reader");
    }

    #[test]
    fn test_user_role_roundtrip() {
        // 문자열 → UserRole → 문자열 변환 테스트
        let roles = ["admin", "author", "reader"];

        for &role_str in &roles {
            let role = UserRole::from_str(role_str).unwrap();
            assert_eq!(role.as_str(), role_str);
        }
    }

    #[test]
    fn test_user_role_serialization() {
        // 저장소/토큰에 기록되는 표현이 소문자 문자열인지 확인
        let role = UserRole::Author;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"author\"");

        let deserialized: UserRole = serde_json::from_str(&json).unwrap();
        assert_eq!(role, deserialized);

        // 열거형 밖의 값은 역직렬화 단계에서 거부
        assert!(serde_json::from_str::<UserRole>("\"superuser\"").is_err());
    }
}
