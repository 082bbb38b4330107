//! 역할 일괄 변경 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::config::UserRole;

/// 역할 일괄 변경 요청 DTO
///
/// 존재하지 않는 ID는 에러 없이 건너뛰며, 실제로 변경된 계정 수가 반환됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkRoleUpdateRequest {
    /// 대상 사용자 ID 목록
    #[validate(length(min = 1, message = "대상 사용자 ID가 최소 1개 필요합니다"))]
    pub user_ids: Vec<String>,

    /// 일괄 적용할 역할
    pub role: UserRole,
}
