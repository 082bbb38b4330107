//! 블로그 플랫폼 백엔드: 사용자 계정/인증 서브시스템
//!
//! 멀티 테넌트 콘텐츠 플랫폼의 사용자 계정 관리와 인증을 담당하는
//! 코어 라이브러리입니다. 계정 생성, 자격증명 검증, 역할 기반 권한 확인,
//! 비밀번호 생명주기 관리, 페이지네이션 기반 사용자 목록 조회를 제공하며
//! 싱글톤 매크로를 활용한 의존성 주입으로 구성됩니다.
//!
//! # Features
//!
//! - **계정 관리**: 회원가입, 프로필 수정, 소프트 삭제/복구
//! - **인증**: bcrypt 비밀번호 검증, JWT 액세스/리프레시 토큰 발급
//! - **권한**: admin / author / reader 역할 기반 본인-또는-관리자 규칙
//! - **목록 조회**: 생성일 역순 페이지네이션, 검색, 역할 필터, 역할별 통계
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **MongoDB**: 사용자 데이터 영구 저장 (유니크 인덱스로 중복 차단)
//! - **Redis**: 조회 캐싱
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Access Boundary │ ← 외부 HTTP 계층 (이 크레이트 범위 밖)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (UserService, TokenService)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스 (UserRepository)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use blog_service_backend::services::users::user_service::UserService;
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let user_service = UserService::instance();
//!
//! // 회원가입 및 로그인
//! let user = user_service.create_user(request).await?;
//! let session = user_service.login("alice", "password1234").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
