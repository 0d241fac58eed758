//! Spoke Shop Server - 自行车店在线商店与后台
//!
//! # 架构概述
//!
//! - **授权** (`auth`): 静态角色权限表、JWT + Argon2 认证、路由守卫
//! - **数据库** (`db`): 嵌入式 redb 存储与仓储层
//! - **HTTP API** (`api`): 店面 (`/api/shop/*`) 与后台接口
//! - **定价** (`pricing`): 订单金额计算
//!
//! # 模块结构
//!
//! ```text
//! shop-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── auth/          # 权限表、JWT、中间件、登录锁定
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由装配与 tower 中间件
//! ├── db/            # redb 存储与仓储
//! ├── pricing.rs     # 金额计算
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod pricing;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use routes::build_app;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 `.env`，初始化日志
///
/// 日志相关变量 (`LOG_LEVEL`, `LOG_JSON`, `LOG_DIR`) 在 [`Config`] 之前读取，
/// 以便配置错误也能被记录。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok().map(std::path::PathBuf::from);
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(level.as_deref(), json, log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____             __
  / ___/____  ____  / /_____
  \__ \/ __ \/ __ \/ //_/ _ \
 ___/ / /_/ / /_/ / ,< /  __/
/____/ .___/\____/_/|_|\___/
    /_/        bike shop
    "#
    );
}
