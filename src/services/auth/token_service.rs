//! JWT 토큰 발급 서비스 구현
//!
//! JSON Web Token 기반의 세션 자격증명 발급을 담당합니다.
//! 수신 토큰의 검증은 외부 Access Boundary의 책임이며,
//! 이 서비스는 발급만을 수행합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use singleton_macro::service;
use crate::config::JwtConfig;
use crate::domain::dto::users::response::user_response::UserResponse;
use crate::domain::models::token::token::{TokenClaims, TokenPair};
use crate::core::errors::AppError;

/// JWT 토큰 발급 서비스
///
/// HMAC-SHA256 서명을 사용하여 시간 제한이 있는 JWT 토큰을 생성합니다.
/// 액세스 토큰(기본 24시간)과 리프레시 토큰(기본 7일)을 지원합니다.
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 인증된 신원의 클레임으로 JWT 액세스 토큰 생성
    ///
    /// 클레임은 `{sub: 사용자 ID, username, role}`과 발급/만료 시각으로
    /// 구성됩니다.
    ///
    /// # Arguments
    ///
    /// * `user` - 토큰을 발급받을 사용자 뷰
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 생성된 JWT 액세스 토큰
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 사용자 ID 없음
    pub fn generate_access_token(&self, user: &UserResponse) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(JwtConfig::expiration_hours());

        let claims = TokenClaims {
            sub: self.subject_of(user)?,
            username: user.username.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 리프레시 토큰 생성
    ///
    /// 액세스 토큰과 동일한 클레임을 담되 만료 기간이 깁니다.
    ///
    /// # Security
    ///
    /// 리프레시 토큰은 사용자 문서에 통째로 덮어쓰기 저장되며,
    /// 회수/블랙리스트 인프라는 이 서브시스템의 범위 밖입니다.
    pub fn generate_refresh_token(&self, user: &UserResponse) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::days(JwtConfig::refresh_expiration_days());

        let claims = TokenClaims {
            sub: self.subject_of(user)?,
            username: user.username.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("리프레시 토큰 생성 실패: {}", e)))
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_pair = token_service.generate_token_pair(&user)?;
    /// println!("Access token: {}", token_pair.access_token);
    /// println!("Expires in: {} seconds", token_pair.expires_in);
    /// ```
    pub fn generate_token_pair(&self, user: &UserResponse) -> Result<TokenPair, AppError> {
        let access_token = self.generate_access_token(user)?;
        let refresh_token = self.generate_refresh_token(user)?;
        let expires_in = JwtConfig::expiration_hours() * 3600; // 초 단위로 변환

        Ok(TokenPair {
            access_token,
            refresh_token: Some(refresh_token),
            expires_in,
        })
    }

    /// 토큰 주체(sub) 클레임 추출
    fn subject_of(&self, user: &UserResponse) -> Result<String, AppError> {
        if user.id.is_empty() {
            return Err(AppError::InternalError("사용자 ID가 없습니다".to_string()));
        }
        Ok(user.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use mongodb::bson::DateTime;
    use crate::config::UserRole;

    fn sample_view(id: &str) -> UserResponse {
        UserResponse {
            id: id.to_string(),
            username: "alice_kim".to_string(),
            email: "alice@example.com".to_string(),
            role: UserRole::Author,
            title: None,
            is_active: true,
            deleted_at: None,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_issued_token_carries_identity_claims() {
        let service = TokenService::instance();
        let token = service
            .generate_access_token(&sample_view("507f1f77bcf86cd799439011"))
            .unwrap();

        let decoding_key = DecodingKey::from_secret(JwtConfig::secret().as_ref());
        let decoded = decode::<TokenClaims>(&token, &decoding_key, &Validation::default()).unwrap();

        assert_eq!(decoded.claims.sub, "507f1f77bcf86cd799439011");
        assert_eq!(decoded.claims.username, "alice_kim");
        assert_eq!(decoded.claims.role, UserRole::Author);
        assert!(decoded.claims.exp > decoded.claims.iat);
    }

    #[test]
    fn test_token_pair_contains_refresh_token() {
        let service = TokenService::instance();
        let pair = service
            .generate_token_pair(&sample_view("507f1f77bcf86cd799439011"))
            .unwrap();

        assert!(pair.refresh_token.is_some());
        assert_eq!(pair.expires_in, JwtConfig::expiration_hours() * 3600);
        assert_ne!(Some(pair.access_token), pair.refresh_token);
    }

    #[test]
    fn test_missing_user_id_is_rejected() {
        let service = TokenService::instance();
        let result = service.generate_access_token(&sample_view(""));
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}
