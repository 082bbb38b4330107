use serde::{Deserialize, Serialize};
use super::user_response::UserResponse;

/// 사용자 목록 페이지 응답 DTO
///
/// 생성일 역순으로 정렬된 한 페이지 분량의 사용자 뷰와
/// 전체 건수/페이지 수를 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    /// 필터 조건에 일치하는 전체 사용자 수
    pub total: u64,
    /// 현재 페이지 (1-based)
    pub page: i64,
    /// 전체 페이지 수 (ceil(total / limit))
    pub total_pages: u64,
}
