//! # Application Error Handling System
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`를 사용하여 타입 안전하고 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 카테고리
//!
//! ### 1. 인프라 계층 에러
//! - `DatabaseError`: MongoDB 연결 오류, 쿼리 실행 오류
//! - `RedisError`: Redis 캐시 시스템 관련 오류
//!
//! ### 2. 비즈니스 계층 에러
//! - `ValidationError`: 잘못된 입력값 (Access Boundary의 검증 실패 포함)
//! - `ConflictError`: 유니크 제약 위반 등 비즈니스 규칙 위반
//! - `NotFound`: 요청된 리소스가 존재하지 않음
//!
//! ### 3. 보안 계층 에러
//! - `AuthenticationError`: 인증 실패 (로그인 실패, 토큰 발급 불가 등)
//! - `AuthorizationError`: 권한 부족 (본인-또는-관리자 규칙 위반 등)
//!
//! ### 4. 시스템 계층 에러
//! - `InternalError`: 예상하지 못한 시스템 오류 (해시 손상 등)
//!
//! 단, "비밀번호 불일치"는 빈번히 발생하는 정상 흐름이므로 에러가 아닌
//! 값(`Ok(false)` / `Ok(None)`)으로 반환됩니다. 호출 측에서 메시지를
//! 선택할 수 있도록 하기 위함입니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn create_user(data: CreateUserRequest) -> Result<User, AppError> {
//!     if user_repo.email_exists(&data.email).await? {
//!         return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
//!     }
//!
//!     let user = user_repo.create(data).await
//!         .map_err(|e| AppError::DatabaseError(e.to_string()))?;
//!
//!     Ok(user)
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 백엔드 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 외부 Access Boundary(HTTP 계층)가 이 타입을 받아 적절한 응답으로 변환합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (유니크 제약 위반)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 내부 서버 에러
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let error = AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string());
        assert_eq!(error.to_string(), "Conflict error: 이미 사용 중인 사용자명입니다");

        let error = AppError::NotFound("사용자를 찾을 수 없습니다".to_string());
        assert_eq!(error.to_string(), "Not found: 사용자를 찾을 수 없습니다");

        let error = AppError::AuthorizationError("관리자 권한이 필요합니다".to_string());
        assert_eq!(error.to_string(), "Authorization error: 관리자 권한이 필요합니다");
    }

    #[test]
    fn test_error_variants_are_distinguishable() {
        // Access Boundary가 상태 코드 매핑에 사용하는 분기 확인
        let errors = vec![
            AppError::ValidationError("v".to_string()),
            AppError::NotFound("n".to_string()),
            AppError::ConflictError("c".to_string()),
            AppError::AuthenticationError("a".to_string()),
            AppError::AuthorizationError("z".to_string()),
        ];

        let mut matched = 0;
        for error in &errors {
            match error {
                AppError::ValidationError(_) => matched += 1,
                AppError::NotFound(_) => matched += 1,
                AppError::ConflictError(_) => matched += 1,
                AppError::AuthenticationError(_) => matched += 1,
                AppError::AuthorizationError(_) => matched += 1,
                _ => {}
            }
        }
        assert_eq!(matched, errors.len());
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let result: Result<(), &str> = Err("boom");
        let app_result = result.with_context(|| format!("failed for user {}", "alice"));

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("failed for user alice"));
            assert!(msg.contains("boom"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
