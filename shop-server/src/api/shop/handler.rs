//! Storefront API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{
    Appointment, AppointmentCreate, Article, Brand, Category, CheckoutRequest, CouponCheck,
    EventRegister, EventSummary, MAX_AMOUNT, Order, Product, ProductQuery, StoreInfo,
};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::db::repository::{
    AppointmentRepository, ArticleRepository, BrandRepository, CategoryRepository,
    CouponRepository, EventRepository, OrderRepository, ProductRepository, SettingsRepository,
};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

// ── Catalog ─────────────────────────────────────────────────────────

/// Active products (`?category_id=&brand_id=&q=`)
pub async fn list_products(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.storage.clone());
    Ok(Json(repo.search(&query, true)?))
}

/// Inactive products are reported as missing
pub async fn get_product(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.storage.clone());
    let product = repo
        .find_by_id(id)?
        .filter(|p| p.is_active)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
        })?;
    Ok(Json(product))
}

pub async fn list_categories(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.storage.clone());
    Ok(Json(repo.find_active()?))
}

pub async fn list_brands(State(state): State<ServerState>) -> AppResult<Json<Vec<Brand>>> {
    let repo = BrandRepository::new(state.storage.clone());
    Ok(Json(repo.find_active()?))
}

// ── Orders ──────────────────────────────────────────────────────────

/// Place an order
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<Order>> {
    validate_required_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_email(&payload.customer_email, "customer_email")?;
    validate_required_text(&payload.shipping_address, "shipping_address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.coupon_code, "coupon_code", MAX_SHORT_TEXT_LEN)?;

    let repo = OrderRepository::new(state.storage.clone());
    let order = repo.checkout(payload)?;
    tracing::info!(
        order_id = order.id,
        items = order.items.len(),
        total = %order.total,
        coupon = order.coupon_code.as_deref().unwrap_or(""),
        "Order placed"
    );
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct OrderLookup {
    pub email: String,
}

/// Customer order lookup: id plus the email used at checkout
pub async fn lookup_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(lookup): Query<OrderLookup>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.storage.clone());
    Ok(Json(repo.find_for_customer(id, &lookup.email)?))
}

// ── Workshop ────────────────────────────────────────────────────────

/// Book a repair or bike fitting
pub async fn book_appointment(
    State(state): State<ServerState>,
    Json(payload): Json<AppointmentCreate>,
) -> AppResult<Json<Appointment>> {
    validate_required_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_email(&payload.customer_email, "customer_email")?;
    validate_optional_text(&payload.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.bike_description, "bike_description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.issue, "issue", MAX_NOTE_LEN)?;

    let today = chrono::Utc::now().date_naive();
    let repo = AppointmentRepository::new(state.storage.clone());
    let appointment = repo.create(payload, today)?;
    tracing::info!(
        appointment_id = appointment.id,
        date = %appointment.preferred_date,
        "Appointment booked"
    );
    Ok(Json(appointment))
}

// ── Coupons ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CouponCheckQuery {
    pub subtotal: Decimal,
}

/// Would this coupon apply to a basket of `subtotal`?
pub async fn check_coupon(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Query(query): Query<CouponCheckQuery>,
) -> AppResult<Json<CouponCheck>> {
    validate_required_text(&code, "code", MAX_SHORT_TEXT_LEN)?;
    if query.subtotal.is_sign_negative() || query.subtotal > MAX_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Subtotal must be between 0 and {MAX_AMOUNT}"),
        )
        .with_detail("field", "subtotal"));
    }
    let repo = CouponRepository::new(state.storage.clone());
    Ok(Json(repo.check(&code, query.subtotal)?))
}

// ── Content ─────────────────────────────────────────────────────────

pub async fn list_articles(State(state): State<ServerState>) -> AppResult<Json<Vec<Article>>> {
    let repo = ArticleRepository::new(state.storage.clone());
    Ok(Json(repo.find_published()?))
}

pub async fn get_article(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Article>> {
    let repo = ArticleRepository::new(state.storage.clone());
    let article = repo
        .find_by_id(id)?
        .filter(|a| a.published)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ArticleNotFound, format!("Article {} not found", id))
        })?;
    Ok(Json(article))
}

/// Published events; registrant details stay private
pub async fn list_events(State(state): State<ServerState>) -> AppResult<Json<Vec<EventSummary>>> {
    let repo = EventRepository::new(state.storage.clone());
    let events = repo.find_published()?;
    Ok(Json(events.iter().map(EventSummary::from).collect()))
}

pub async fn get_event(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EventSummary>> {
    let repo = EventRepository::new(state.storage.clone());
    let event = repo
        .find_by_id(id)?
        .filter(|e| e.published)
        .ok_or_else(|| event_not_found(id))?;
    Ok(Json(EventSummary::from(&event)))
}

pub async fn register_for_event(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EventRegister>,
) -> AppResult<Json<EventSummary>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email, "email")?;

    let repo = EventRepository::new(state.storage.clone());
    let event = repo.register(id, payload, now_millis())?;
    tracing::info!(event_id = id, spots_left = event.spots_left(), "Event registration");
    Ok(Json(EventSummary::from(&event)))
}

// ── Store ───────────────────────────────────────────────────────────

pub async fn store_info(State(state): State<ServerState>) -> AppResult<Json<StoreInfo>> {
    let settings = SettingsRepository::new(state.storage.clone()).get()?;
    Ok(Json(StoreInfo::from(&settings)))
}

fn event_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::EventNotFound, format!("Event {} not found", id))
}
