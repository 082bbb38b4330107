//! 블로그 플랫폼 백엔드 부트스트랩 바이너리
//!
//! 데이터 스토어(MongoDB, Redis)에 연결하고 서비스 레지스트리를 초기화한 뒤,
//! 사용자 컬렉션 인덱스를 보장하고 필요 시 초기 관리자 계정을 시딩합니다.
//! HTTP Access Boundary는 이 크레이트를 라이브러리로 사용하는 외부 계층입니다.

use std::sync::Arc;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use blog_service_backend::caching::redis::RedisClient;
use blog_service_backend::config::UserRole;
use blog_service_backend::core::errors::AppError;
use blog_service_backend::core::registry::ServiceLocator;
use blog_service_backend::db::Database;
use blog_service_backend::domain::dto::users::request::CreateUserRequest;
use blog_service_backend::repositories::users::user_repo::UserRepository;
use blog_service_backend::services::users::user_service::UserService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 블로그 플랫폼 백엔드 초기화 중...");

    // 데이터 스토어 초기화
    let (database, redis_client) = initialize_data_stores().await;

    // ServiceLocator에 인프라 컴포넌트 등록
    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    // 모든 서비스/리포지토리 초기화
    ServiceLocator::initialize_all()
        .await
        .expect("서비스 초기화 실패");

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // 유니크 인덱스 보장 (동시 가입 경합의 최종 심판)
    UserRepository::instance().create_indexes().await?;
    info!("✅ 사용자 컬렉션 인덱스 생성 완료");

    // 초기 관리자 계정 시딩
    seed_admin_account().await?;

    info!("🏁 부트스트랩 완료");

    Ok(())
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 기반으로 로깅 레벨을 설정합니다. 기본값은 info 레벨입니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// 데이터베이스 연결을 설정하고 Arc로 래핑된 핸들을 반환합니다.
/// 연결 실패 시 애플리케이션이 종료됩니다.
async fn initialize_data_stores() -> (Arc<Database>, Arc<RedisClient>) {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(
        Database::new()
            .await
            .expect("데이터베이스 연결 실패")
    );

    info!("✅ MongoDB 연결 성공");

    let redis_client = Arc::new(
        RedisClient::new()
            .await
            .expect("Redis 연결 실패")
    );

    info!("✅ Redis 연결 성공");

    (database, redis_client)
}

/// 초기 관리자 계정을 시딩합니다
///
/// 다음 환경변수가 모두 설정된 경우에만 동작합니다:
///
/// * `SEED_ADMIN_USERNAME` - 관리자 사용자명
/// * `SEED_ADMIN_EMAIL` - 관리자 이메일
/// * `SEED_ADMIN_PASSWORD` - 관리자 초기 비밀번호
///
/// 이미 같은 사용자명의 계정이 있으면 건너뜁니다.
async fn seed_admin_account() -> Result<(), Box<dyn std::error::Error>> {
    let (username, email, password) = match (
        std::env::var("SEED_ADMIN_USERNAME"),
        std::env::var("SEED_ADMIN_EMAIL"),
        std::env::var("SEED_ADMIN_PASSWORD"),
    ) {
        (Ok(username), Ok(email), Ok(password)) => (username, email, password),
        _ => {
            info!("관리자 시딩 환경변수 미설정 - 시딩 건너뜀");
            return Ok(());
        }
    };

    let user_service = UserService::instance();

    let request = CreateUserRequest {
        username: username.clone(),
        email,
        password,
        role: UserRole::Admin,
        title: Some("플랫폼 관리자".to_string()),
    };

    match user_service.create_user(request).await {
        Ok(response) => {
            info!("✅ 초기 관리자 계정 생성: {}", response.user.username);
        }
        Err(AppError::ConflictError(_)) => {
            warn!("관리자 계정 '{}' 이미 존재 - 시딩 건너뜀", username);
        }
        Err(e) => return Err(Box::new(e)),
    }

    Ok(())
}
