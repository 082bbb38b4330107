//! # 비밀번호 해싱 유틸리티
//!
//! 자격증명 해싱/검증을 담당하는 단일 진입점입니다.
//! bcrypt(적응형 워크 팩터)를 사용하며, 환경별 cost는
//! [`PasswordConfig`](crate::config::PasswordConfig)가 결정합니다.
//!
//! 평문 비밀번호는 이 모듈을 통과한 뒤 어디에도 저장되거나 로깅되지 않습니다.
//! 서비스 계층(가입)과 리포지토리 계층(비밀번호 변경)이 동일한 해셔를 공유합니다.

use crate::config::PasswordConfig;
use crate::core::errors::AppError;

/// 평문 비밀번호를 bcrypt 해시로 변환합니다.
///
/// 솔트는 bcrypt가 자동 생성하며, cost는 환경 설정을 따릅니다.
/// 해싱은 의도적으로 느린 연산이므로 처리 시간을 로그로 남깁니다.
///
/// # 반환값
///
/// * `Ok(String)` - bcrypt 해시 문자열
/// * `Err(AppError::InternalError)` - 해싱 실패 (시스템 오류)
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let bcrypt_cost = PasswordConfig::bcrypt_cost();

    let hash_start = std::time::Instant::now();
    let hashed = bcrypt::hash(plain, bcrypt_cost)
        .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
    let hash_duration = hash_start.elapsed();

    log::debug!("Password hashing took: {:?}", hash_duration);

    Ok(hashed)
}

/// 평문 비밀번호를 저장된 해시와 대조합니다.
///
/// bcrypt 검증은 일치 여부와 무관하게 동일한 시간이 소요되어
/// 타이밍 공격으로 일치 길이가 누출되지 않습니다.
///
/// # 반환값
///
/// * `Ok(true)` - 비밀번호 일치
/// * `Ok(false)` - 비밀번호 불일치 (에러가 아닌 값으로 반환)
/// * `Err(AppError::InternalError)` - 저장된 해시가 손상된 경우
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, AppError> {
    let verify_start = std::time::Instant::now();
    let is_valid = bcrypt::verify(plain, hashed)
        .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
    let verify_duration = verify_start.elapsed();

    log::debug!("Password verification took: {:?}", verify_duration);

    Ok(is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hashed = hash_password("correct-horse-battery").unwrap();

        // 해시에는 평문이 포함되지 않음
        assert!(!hashed.contains("correct-horse-battery"));

        assert!(verify_password("correct-horse-battery", &hashed).unwrap());
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn test_rehash_invalidates_old_password() {
        // 비밀번호 변경 시나리오: 새 해시에서 이전 비밀번호는 더 이상 유효하지 않음
        let old_hash = hash_password("old-password-1234").unwrap();
        let new_hash = hash_password("new-password-5678").unwrap();

        assert!(verify_password("old-password-1234", &old_hash).unwrap());
        assert!(!verify_password("old-password-1234", &new_hash).unwrap());
        assert!(verify_password("new-password-5678", &new_hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        // 솔트 자동 생성으로 동일 비밀번호도 매번 다른 해시 생성
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_error_not_false() {
        // 손상된 해시는 데이터 오염 상황이므로 값이 아닌 에러로 구분
        let result = verify_password("anything", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}
