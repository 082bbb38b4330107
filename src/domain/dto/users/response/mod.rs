//! 사용자 응답 DTO 모듈
//!
//! 응답 DTO는 외부로 나가는 사용자 뷰입니다. 민감 필드
//! (`password_hash`, `refresh_token`)는 타입 수준에서 존재하지 않으므로
//! 어떤 응답/로그/에러에도 포함될 수 없습니다.

pub mod role_stats_response;
pub mod user_list_response;
pub mod user_response;

pub use role_stats_response::RoleCount;
pub use user_list_response::UserListResponse;
pub use user_response::{CreateUserResponse, LoginResponse, UserResponse};
