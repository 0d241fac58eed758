//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录与当前用户
//! - [`roles`] - 角色与权限说明
//! - [`staff`] - 员工管理
//! - [`products`] / [`categories`] / [`brands`] / [`suppliers`] - 商品目录与库存
//! - [`orders`] - 订单管理
//! - [`repairs`] - 维修与 fitting 预约
//! - [`coupons`] - 优惠券
//! - [`articles`] / [`events`] - 内容与社区活动
//! - [`reports`] - 报表
//! - [`settings`] - 店铺设置
//! - [`shop`] - 匿名店面接口 (`/api/shop/*`)

pub mod auth;
pub mod health;
pub mod roles;
pub mod staff;

// Catalog
pub mod brands;
pub mod categories;
pub mod products;
pub mod suppliers;

// Sales & workshop
pub mod coupons;
pub mod orders;
pub mod repairs;

// Content
pub mod articles;
pub mod events;

// Back office
pub mod reports;
pub mod settings;

// Storefront
pub mod shop;

pub use crate::utils::{AppError, AppResult};
