//! 认证中间件
//!
//! 为 JWT 认证和基于角色的授权提供 Axum 中间件

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::models::Permission;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::StaffRepository;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

type GuardFuture = Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>;

/// Public routes that skip authentication
fn is_public_route(path: &str) -> bool {
    path == "/api/auth/login" || path == "/api/health" || path.starts_with("/api/shop/")
}

/// 认证中间件 - 要求员工登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT，
/// 成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/auth/login`, `/api/health`
/// - `/api/shop/*` (匿名店面)
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 / 账号已删除 | 401 TokenInvalid |
/// | 账号已停用 | 401 AccountDisabled |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || is_public_route(path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().to_string());
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;

            // 令牌签发后账号可能已被停用或删除
            match StaffRepository::new(state.storage.clone()).find_record(user.id)? {
                Some(record) if record.is_active => {}
                Some(_) => {
                    security_log!("WARN", "auth_disabled", user_id = user.id);
                    return Err(AppError::new(ErrorCode::AccountDisabled));
                }
                None => {
                    security_log!("WARN", "auth_unknown_user", user_id = user.id);
                    return Err(AppError::invalid_token("Account no longer exists"));
                }
            }

            if user.role.is_none() {
                security_log!(
                    "WARN",
                    "unknown_role",
                    user_id = user.id,
                    role = user.role_name.clone()
                );
            }
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().to_string()
            );
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 角色名无法识别的令牌没有任何权限，返回 403 UnknownRole
fn reject_unknown_role(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.is_some() {
        return Ok(());
    }
    security_log!(
        "WARN",
        "permission_denied",
        user_id = user.id,
        user_role = user.role_name.clone(),
        reason = "unknown_role"
    );
    Err(AppError::new(ErrorCode::UnknownRole).with_detail("role", user.role_name.clone()))
}

/// 权限检查中间件 - 要求特定权限
///
/// ```ignore
/// Router::new()
///     .route("/", post(handler::create))
///     .layer(middleware::from_fn(require_permission(Permission::ManageUsers)));
/// ```
///
/// 无权限返回 403 PermissionDenied，未知角色返回 403 UnknownRole
pub fn require_permission(
    permission: Permission,
) -> impl Fn(Request, Next) -> GuardFuture + Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::unauthorized)?;

            reject_unknown_role(user)?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id,
                    user_role = user.role_name.clone(),
                    required_permission = permission.as_str()
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                ))
                .with_detail("required", permission.as_str()));
            }

            Ok(next.run(req).await)
        })
    }
}

/// 任一权限检查中间件
///
/// 用户拥有 `permissions` 中任意一项即放行；空列表永远拒绝。
pub fn require_any_permission(
    permissions: &'static [Permission],
) -> impl Fn(Request, Next) -> GuardFuture + Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::unauthorized)?;

            reject_unknown_role(user)?;

            if !user.has_any_permission(permissions) {
                let required = permissions
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join("|");
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id,
                    user_role = user.role_name.clone(),
                    required_permission = required.clone()
                );
                return Err(AppError::forbidden(format!("Permission denied: {}", required))
                    .with_detail("required", required));
            }

            Ok(next.run(req).await)
        })
    }
}

/// 从请求中提取 CurrentUser 的扩展方法
pub trait CurrentUserExt {
    /// 未认证返回 401
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or_else(AppError::unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public_route("/api/auth/login"));
        assert!(is_public_route("/api/health"));
        assert!(is_public_route("/api/shop/products"));
        assert!(!is_public_route("/api/shop"));
        assert!(!is_public_route("/api/auth/me"));
        assert!(!is_public_route("/api/staff"));
    }
}
