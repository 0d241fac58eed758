use std::path::PathBuf;

use crate::auth::{JwtConfig, MAX_FAILED_ATTEMPTS};
use crate::core::{Result, ServerError};

/// Default fixed delay before answering a login attempt
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 500;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (`RUST_LOG` 优先) |
/// | LOG_JSON | false | JSON 日志输出 |
/// | LOG_DIR | - | 日志目录 (按天滚动) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | ADMIN_NAME | Administrator | 初始管理员名称 |
/// | ADMIN_EMAIL | admin@spoke.shop | 初始管理员邮箱 |
/// | ADMIN_PASSWORD | - | 初始管理员密码 (空库首次启动时必填) |
/// | JWT_SECRET | - | JWT 密钥 (release 构建必填) |
/// | JWT_EXPIRATION_MINUTES | 720 | 令牌有效期 |
/// | JWT_ISSUER / JWT_AUDIENCE | spoke-shop / spoke-back-office | 令牌声明 |
/// | LOGIN_MAX_ATTEMPTS | 5 | 锁定前允许的登录失败次数 |
/// | LOGIN_DELAY_MS | 500 | 登录固定延迟(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/spoke HTTP_PORT=8080 ADMIN_PASSWORD=change-me-now cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库与日志
    pub work_dir: PathBuf,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// JSON 日志
    pub log_json: bool,
    /// 日志目录
    pub log_dir: Option<PathBuf>,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 初始管理员
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 登录失败锁定阈值
    pub login_max_attempts: u32,
    /// 登录固定延迟 (毫秒)，抵御计时攻击
    pub login_delay_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Result<Self> {
        let http_port = match std::env::var("HTTP_PORT") {
            Ok(p) => p
                .parse()
                .map_err(|_| ServerError::Config(format!("HTTP_PORT is not a valid port: {p}")))?,
            Err(_) => 3000,
        };

        Ok(Self {
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            http_port,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().map(PathBuf::from),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            admin_name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".into()),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@spoke.shop".into()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
            jwt: JwtConfig::from_env()?,
            login_max_attempts: std::env::var("LOGIN_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(MAX_FAILED_ATTEMPTS),
            login_delay_ms: std::env::var("LOGIN_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LOGIN_DELAY_MS),
        })
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景，不读取环境变量
    pub fn with_overrides(work_dir: impl Into<PathBuf>, http_port: u16, jwt: JwtConfig) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            request_timeout_ms: 30000,
            admin_name: "Administrator".into(),
            admin_email: "admin@spoke.shop".into(),
            admin_password: None,
            jwt,
            login_max_attempts: MAX_FAILED_ATTEMPTS,
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
        }
    }

    /// redb 数据库文件
    pub fn database_path(&self) -> PathBuf {
        self.work_dir.join("shop.redb")
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
