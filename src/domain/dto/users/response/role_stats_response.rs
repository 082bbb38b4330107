use serde::{Deserialize, Serialize};
use crate::config::UserRole;

/// 역할별 사용자 수 집계 결과
///
/// 관리자 대시보드용 통계로, MongoDB 집계 파이프라인의
/// `$group` 결과 문서와 동일한 형태입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCount {
    /// 집계 대상 역할
    pub role: UserRole,
    /// 해당 역할의 사용자 수
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_aggregation_document() {
        // $project 이후의 집계 결과 문서 형태
        let doc = mongodb::bson::doc! { "role": "author", "count": 7 };
        let stat: RoleCount = mongodb::bson::from_document(doc).unwrap();

        assert_eq!(stat.role, UserRole::Author);
        assert_eq!(stat.count, 7);
    }
}
