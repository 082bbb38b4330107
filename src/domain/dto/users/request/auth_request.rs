//! 로그인 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 사용자명/비밀번호 로그인 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// 사용자명
    #[validate(length(min = 1, message = "사용자명은 필수입니다"))]
    pub username: String,

    /// 평문 비밀번호
    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,
}
