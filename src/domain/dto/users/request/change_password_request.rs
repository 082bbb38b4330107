//! 비밀번호 변경 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 비밀번호 변경 요청 DTO
///
/// 현재 비밀번호 확인에 성공해야만 새 비밀번호로 교체됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// 현재 비밀번호 (저장된 해시와 대조됨)
    pub current_password: String,

    /// 새 비밀번호 (최소 8자)
    #[validate(length(
        min = 8,
        message = "비밀번호는 최소 8자 이상이어야 합니다"
    ))]
    pub new_password: String,
}
