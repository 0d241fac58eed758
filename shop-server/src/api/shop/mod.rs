//! Storefront API Module
//!
//! Anonymous endpoints under `/api/shop`; `require_auth` lets them through.
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /products, /products/{id} | GET | 在售商品 |
//! | /categories, /brands | GET | 目录筛选 |
//! | /orders | POST | 下单 |
//! | /orders/{id}?email= | GET | 顾客查询订单 |
//! | /appointments | POST | 预约维修 / fitting |
//! | /coupons/{code}?subtotal= | GET | 校验优惠券 |
//! | /articles, /articles/{id} | GET | 已发布文章 |
//! | /events, /events/{id} | GET | 已发布活动 |
//! | /events/{id}/register | POST | 报名 |
//! | /info | GET | 店铺信息 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shop", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/products", get(handler::list_products))
        .route("/products/{id}", get(handler::get_product))
        .route("/categories", get(handler::list_categories))
        .route("/brands", get(handler::list_brands))
        .route("/orders", post(handler::checkout))
        .route("/orders/{id}", get(handler::lookup_order))
        .route("/appointments", post(handler::book_appointment))
        .route("/coupons/{code}", get(handler::check_coupon))
        .route("/articles", get(handler::list_articles))
        .route("/articles/{id}", get(handler::get_article))
        .route("/events", get(handler::list_events))
        .route("/events/{id}", get(handler::get_event))
        .route("/events/{id}/register", post(handler::register_for_event))
        .route("/info", get(handler::store_info))
}
