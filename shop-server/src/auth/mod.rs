//! 认证授权模块
//!
//! - [`permissions`] - 静态角色权限表
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] / [`require_permission`] / [`require_any_permission`] - 中间件
//! - [`LoginGuard`] - 登录失败锁定

pub mod extractor;
pub mod jwt;
pub mod login_guard;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use login_guard::{LOCK_WINDOW, LoginGuard, MAX_FAILED_ATTEMPTS};
pub use middleware::{CurrentUserExt, require_any_permission, require_auth, require_permission};
pub use permissions::{
    PermissionSet, RolePermissionMap, has_any_permission, has_permission, permissions_for_role,
    permissions_for_role_name,
};
