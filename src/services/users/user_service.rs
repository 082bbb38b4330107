//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 전체 생명주기를 관리하는 핵심 비즈니스 로직을 구현합니다.
//! 계정 등록, 인증과 세션 발급, 비밀번호 변경, 프로필 수정,
//! 소프트 삭제/복구, 목록 조회, 역할 일괄 변경을 담당합니다.
//!
//! ## 서비스 계약
//!
//! - 모든 호출은 상태를 보유하지 않으며, 매 연산마다 저장소에서
//!   신선한 사용자 레코드를 읽습니다 (서비스 레벨 캐싱/메모이제이션 없음).
//! - 외부로 반환되는 모든 사용자 데이터는 민감 필드가 제거된
//!   [`UserResponse`] 뷰입니다.
//! - 권한 규칙:
//!   - 프로필 수정 / 비밀번호 변경: 계정 소유자 또는 관리자
//!   - 삭제 / 복구 / 역할 일괄 변경 / 통계: 관리자 전용
//!
//! ## 보안 설계 원칙
//!
//! - **bcrypt 해싱**: 적응형 해시 함수로 무차별 대입 공격 방지
//! - **계정 열거 방지**: 인증 실패 시 "사용자명 없음"과 "비밀번호 오류"가
//!   호출자에게 동일한 결과로 보임
//! - **민감 정보 제거**: 뷰 변환 시 비밀번호 해시/리프레시 토큰 제외
//! - **중복 방지**: 사전 검사 + 저장소 유니크 인덱스의 이중 방어

use std::sync::Arc;
use mongodb::bson::doc;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::users::{
            request::{
                BulkRoleUpdateRequest, ChangePasswordRequest, CreateUserRequest,
                LoginRequest, UpdateUserRequest, UserQuery,
            },
            response::{
                role_stats_response::RoleCount,
                user_list_response::UserListResponse,
                user_response::{CreateUserResponse, LoginResponse, UserResponse},
            },
        },
        entities::users::user::User,
        models::auth::authenticated_user::AuthenticatedUser,
        models::token::token::TokenPair,
    },
    repositories::users::user_repo::UserRepository,
    services::auth::token_service::TokenService,
    utils::password::{hash_password, verify_password},
    utils::string_utils::is_valid_string,
};

/// 사용자 관리 비즈니스 로직 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리되며,
/// UserRepository와 TokenService가 자동으로 주입됩니다:
///
/// ```rust,ignore
/// let user_service = UserService::instance(); // 항상 동일한 인스턴스
/// ```
#[service(name = "user")]
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    user_repo: Arc<UserRepository>,

    /// JWT 토큰 발급 서비스
    token_service: Arc<TokenService>,
}

impl UserService {
    /// 새 사용자 계정 생성
    ///
    /// # 처리 과정
    ///
    /// 1. **중복 사전 검사**: 사용자명/이메일 사용 여부를 병렬로 확인
    /// 2. **비밀번호 해싱**: bcrypt를 사용한 안전한 해싱
    /// 3. **영구 저장**: Repository를 통한 데이터베이스 저장
    /// 4. **응답 생성**: 민감 정보를 제거한 뷰 반환
    ///
    /// # 반환값
    ///
    /// * `Ok(CreateUserResponse)` - 생성된 사용자 뷰와 성공 메시지
    /// * `Err(AppError::ConflictError)` - 이메일 또는 사용자명 중복
    /// * `Err(AppError::InternalError)` - 비밀번호 해싱 실패
    ///
    /// # 동시성
    ///
    /// 사전 검사와 저장 사이에 다른 요청이 같은 사용자명/이메일을
    /// 선점할 수 있습니다. 이 경합은 저장소의 유니크 인덱스가 판정하며,
    /// 패배한 요청은 동일하게 `ConflictError`를 받습니다.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<CreateUserResponse, AppError> {
        let start_time = std::time::Instant::now();

        // 중복 사전 검사 (병렬)
        let (username_taken, email_taken) = futures_util::try_join!(
            self.user_repo.username_exists(&request.username),
            self.user_repo.email_exists(&request.email),
        )?;

        if username_taken {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        if email_taken {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        // 비밀번호 해싱
        let password_hash = hash_password(&request.password)?;

        // 사용자 엔티티 생성
        let user = User::new(
            request.username,
            request.email,
            password_hash,
            request.role,
            request.title,
        );

        // 저장 (유니크 인덱스가 최종 중복 판정)
        let created_user = self.user_repo.create(user).await?;

        log::info!("Total user creation took: {:?}", start_time.elapsed());

        Ok(CreateUserResponse {
            user: UserResponse::from(created_user),
            message: "사용자가 성공적으로 생성되었습니다".to_string(),
        })
    }

    /// 사용자명/비밀번호 인증
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(UserResponse))` - 인증 성공, 민감 정보가 제거된 사용자 뷰
    /// * `Ok(None)` - 인증 실패 (에러가 아닌 값으로 반환)
    /// * `Err(AppError)` - 저장소 오류 등 시스템 오류
    ///
    /// # 보안 특징
    ///
    /// 존재하지 않는 사용자명, 잘못된 비밀번호, 비활성 계정은
    /// 모두 동일하게 `Ok(None)`으로 반환됩니다. 호출자는 실패 원인을
    /// 구분할 수 없으므로 사용자명 열거 공격이 차단됩니다.
    ///
    /// bcrypt 검증은 일치 여부와 무관하게 동일한 시간이 소요되어
    /// 타이밍 공격을 방지합니다.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserResponse>, AppError> {
        let start_time = std::time::Instant::now();

        let user = match self.user_repo.find_by_username(username).await? {
            Some(user) => user,
            // 존재하지 않는 사용자명 - 비밀번호 오류와 동일한 결과
            None => return Ok(None),
        };

        if !verify_password(password, &user.password_hash)? {
            return Ok(None);
        }

        if !user.is_active {
            return Ok(None);
        }

        log::debug!("Total authentication took: {:?}", start_time.elapsed());

        Ok(Some(UserResponse::from(user)))
    }

    /// 인증된 사용자를 위한 세션 토큰 발급
    ///
    /// TokenService에 클레임 `{sub: id, username, role}`을 위임하여
    /// 액세스/리프레시 토큰 쌍을 생성하고, 리프레시 토큰을
    /// 사용자 문서에 덮어쓰기 저장합니다.
    pub async fn issue_session(&self, user: &UserResponse) -> Result<TokenPair, AppError> {
        let token_pair = self.token_service.generate_token_pair(user)?;

        if let Some(ref refresh_token) = token_pair.refresh_token {
            self.user_repo
                .update_refresh_token(&user.id, Some(refresh_token.as_str()))
                .await?;
        }

        Ok(token_pair)
    }

    /// 로그인
    ///
    /// 인증에 성공하면 세션 토큰을 발급하고 로그인 응답을 반환합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(LoginResponse)` - 사용자 뷰와 토큰
    /// * `Err(AppError::AuthenticationError)` - 인증 실패
    ///   (실패 원인과 무관하게 단일 메시지)
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .authenticate(&request.username, &request.password)
            .await?
            .ok_or_else(|| {
                AppError::AuthenticationError("잘못된 사용자명 또는 비밀번호입니다".to_string())
            })?;

        let token_pair = self.issue_session(&user).await?;

        log::info!("로그인 성공: {}", user.username);

        Ok(LoginResponse::new(user, token_pair))
    }

    /// 로그아웃
    ///
    /// 저장된 리프레시 토큰을 제거합니다.
    pub async fn logout(&self, id: &str) -> Result<(), AppError> {
        self.user_repo.update_refresh_token(id, None).await
    }

    /// ID로 사용자 조회
    ///
    /// # 반환값
    ///
    /// * `Ok(UserResponse)` - 민감 정보가 제거된 사용자 뷰
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn get_user_by_id(&self, id: &str) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 이메일 주소로 사용자 조회
    pub async fn get_user_by_email(&self, email: &str) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 프로필 수정
    ///
    /// 포함된 필드만 병합합니다. 사용자명/이메일이 현재 값과 다른 경우에만
    /// 중복 여부를 재확인합니다 (최종 판정은 저장소 유니크 인덱스).
    ///
    /// # 권한 규칙
    ///
    /// 계정 소유자 또는 관리자만 호출할 수 있습니다.
    /// 그 외 호출자는 페이로드 내용과 무관하게 `AuthorizationError`를 받습니다.
    pub async fn update_profile(
        &self,
        id: &str,
        requester: &AuthenticatedUser,
        patch: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        if !requester.can_manage(id) {
            return Err(AppError::AuthorizationError(
                "본인 계정 또는 관리자만 프로필을 수정할 수 있습니다".to_string(),
            ));
        }

        let user = self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        // 사용자명이 실제로 변경되는 경우에만 중복 재확인
        if let Some(ref username) = patch.username {
            if username != &user.username && self.user_repo.username_exists(username).await? {
                return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
            }
        }

        // 이메일이 실제로 변경되는 경우에만 중복 재확인
        if let Some(ref email) = patch.email {
            if email != &user.email && self.user_repo.email_exists(email).await? {
                return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
            }
        }

        let mut update_doc = doc! {};
        if let Some(username) = patch.username {
            update_doc.insert("username", username);
        }
        if let Some(email) = patch.email {
            update_doc.insert("email", email);
        }
        if let Some(title) = patch.title {
            update_doc.insert("title", title);
        }

        // 변경할 필드가 없으면 현재 상태 반환
        if update_doc.is_empty() {
            return Ok(UserResponse::from(user));
        }

        let updated_user = self.user_repo
            .update(id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(updated_user))
    }

    /// 비밀번호 변경
    ///
    /// # 권한 규칙
    ///
    /// 계정 소유자 또는 관리자만 호출할 수 있습니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(())` - 비밀번호 변경 완료
    /// * `Err(AppError::ValidationError)` - 현재 비밀번호 불일치
    ///   (빈번한 정상 실패이므로 서버 오류가 아닌 클라이언트 오류)
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn change_password(
        &self,
        id: &str,
        requester: &AuthenticatedUser,
        request: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        if !requester.can_manage(id) {
            return Err(AppError::AuthorizationError(
                "본인 계정 또는 관리자만 비밀번호를 변경할 수 있습니다".to_string(),
            ));
        }

        let changed = self.user_repo
            .change_password(id, &request.current_password, &request.new_password)
            .await?;

        if !changed {
            return Err(AppError::ValidationError("현재 비밀번호가 일치하지 않습니다".to_string()));
        }

        log::info!("비밀번호 변경 완료: 사용자 {}", id);

        Ok(())
    }

    /// 사용자 소프트 삭제
    ///
    /// 관리자 전용. 문서는 저장소에 남고 `is_active`/`deleted_at`만 변경됩니다.
    pub async fn remove(&self, id: &str, requester: &AuthenticatedUser) -> Result<(), AppError> {
        if !requester.is_admin() {
            return Err(AppError::AuthorizationError(
                "관리자만 사용자를 삭제할 수 있습니다".to_string(),
            ));
        }

        let user = self.user_repo.soft_delete(id).await?;

        log::warn!("사용자 소프트 삭제: {} (관리자: {})", user.username, requester.id);

        Ok(())
    }

    /// 소프트 삭제된 사용자 복구
    ///
    /// 관리자 전용. `is_active = true, deleted_at = None` 상태로 되돌립니다.
    pub async fn restore(&self, id: &str, requester: &AuthenticatedUser) -> Result<UserResponse, AppError> {
        if !requester.is_admin() {
            return Err(AppError::AuthorizationError(
                "관리자만 사용자를 복구할 수 있습니다".to_string(),
            ));
        }

        let user = self.user_repo.restore(id).await?;

        log::info!("사용자 복구: {} (관리자: {})", user.username, requester.id);

        Ok(UserResponse::from(user))
    }

    /// 사용자 목록 조회
    ///
    /// 생성일 역순으로 정렬된 페이지를 반환하며, 검색어와 역할 필터를
    /// 지원합니다. 역할 필터도 동일한 페이지네이션 경로를 사용합니다.
    /// 모든 레코드는 민감 정보가 제거된 뷰로 변환됩니다.
    pub async fn list(&self, query: UserQuery) -> Result<UserListResponse, AppError> {
        let UserQuery { page, limit, search, role } = query;

        // 공백뿐인 검색어는 무시
        let search_term = search.as_deref().filter(|s| is_valid_string(s));

        let page_result = self.user_repo
            .find_all_with_pagination(page, limit, search_term, role.as_ref())
            .await?;

        Ok(UserListResponse {
            users: page_result.users.into_iter().map(UserResponse::from).collect(),
            total: page_result.total,
            page: page_result.page,
            total_pages: page_result.total_pages,
        })
    }

    /// 역할 일괄 변경
    ///
    /// 관리자 전용. 존재하지 않는 ID는 건너뛰며 실제 변경된 계정 수를 반환합니다.
    pub async fn bulk_update_role(
        &self,
        request: BulkRoleUpdateRequest,
        requester: &AuthenticatedUser,
    ) -> Result<u64, AppError> {
        if !requester.is_admin() {
            return Err(AppError::AuthorizationError(
                "관리자만 역할을 일괄 변경할 수 있습니다".to_string(),
            ));
        }

        let modified = self.user_repo
            .bulk_update_role(&request.user_ids, &request.role)
            .await?;

        log::info!(
            "역할 일괄 변경: {}개 계정 → {} (관리자: {})",
            modified,
            request.role.as_str(),
            requester.id
        );

        Ok(modified)
    }

    /// 역할별 사용자 수 통계
    ///
    /// 관리자 전용. 관리 대시보드용 집계입니다.
    pub async fn stats_by_role(&self, requester: &AuthenticatedUser) -> Result<Vec<RoleCount>, AppError> {
        if !requester.is_admin() {
            return Err(AppError::AuthorizationError(
                "관리자만 통계를 조회할 수 있습니다".to_string(),
            ));
        }

        self.user_repo.stats_by_role().await
    }
}
