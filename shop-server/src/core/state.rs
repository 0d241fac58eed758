use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{JwtService, LOCK_WINDOW, LoginGuard};
use crate::core::{Config, Result, ServerError};
use crate::db::Storage;
use crate::db::repository::StaffRepository;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | storage | Storage | 嵌入式数据库 (redb) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | login_guard | Arc<LoginGuard> | 登录失败锁定 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库
    pub storage: Storage,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 登录失败计数
    pub login_guard: Arc<LoginGuard>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, storage: Storage) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let login_guard = Arc::new(LoginGuard::with_limits(
            config.login_max_attempts,
            LOCK_WINDOW,
        ));
        Self {
            config,
            storage,
            jwt_service,
            login_guard,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录
    /// 2. 打开 redb 数据库
    /// 3. 空库时创建初始管理员 (需要 ADMIN_PASSWORD)
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db_path = config.database_path();
        let storage = Storage::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Database opened");

        let state = Self::new(config.clone(), storage);
        state.bootstrap_admin()?;
        Ok(state)
    }

    /// 首次启动时创建管理员账号
    fn bootstrap_admin(&self) -> Result<()> {
        let repo = StaffRepository::new(self.storage.clone());
        if repo.count()? > 0 {
            return Ok(());
        }
        let password = self.config.admin_password.as_deref().ok_or_else(|| {
            ServerError::Config(
                "ADMIN_PASSWORD must be set to create the first administrator".into(),
            )
        })?;

        if let Some(admin) =
            repo.ensure_bootstrap_admin(&self.config.admin_name, &self.config.admin_email, password)?
        {
            tracing::info!(email = %admin.email, "Created initial administrator");
        }
        Ok(())
    }

    pub fn work_dir(&self) -> PathBuf {
        self.config.work_dir.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 周期性清理过期的登录失败记录
    pub fn start_background_tasks(&self) {
        let guard = self.login_guard.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
            loop {
                interval.tick().await;
                guard.cleanup();
            }
        });
    }
}
