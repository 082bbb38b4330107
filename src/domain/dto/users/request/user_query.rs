//! 사용자 목록 조회 쿼리 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::config::UserRole;

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// 사용자 목록 조회 쿼리 DTO
///
/// 페이지는 1부터 시작하며, `limit` 상한(100)은 Access Boundary의
/// 검증 규칙으로 선언됩니다. 결과는 항상 생성일 역순으로 정렬됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserQuery {
    /// 페이지 번호 (1-based, 기본값 1)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "페이지는 1 이상이어야 합니다"))]
    pub page: i64,

    /// 페이지 크기 (기본값 10, 최대 100)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "페이지 크기는 1-100 사이여야 합니다"))]
    pub limit: i64,

    /// 사용자명 또는 이메일에 대한 대소문자 무관 부분 일치 검색어
    #[serde(default)]
    pub search: Option<String>,

    /// 역할 필터
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            search: None,
            role: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query: UserQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.search, None);
        assert_eq!(query.role, None);
    }

    #[test]
    fn test_query_with_filters() {
        let json = r#"{"page": 2, "limit": 25, "search": "kim", "role": "reader"}"#;
        let query: UserQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 25);
        assert_eq!(query.search, Some("kim".to_string()));
        assert_eq!(query.role, Some(UserRole::Reader));
    }

    #[test]
    fn test_limit_upper_bound_rule() {
        let query = UserQuery {
            limit: 500,
            ..UserQuery::default()
        };
        assert!(query.validate().is_err());

        let query = UserQuery {
            page: 0,
            ..UserQuery::default()
        };
        assert!(query.validate().is_err());

        assert!(UserQuery::default().validate().is_ok());
    }
}
