use actix_web::{web, HttpResponse};

use crate::application::order_query_service::OrderQueryService;
use crate::domain::errors::DomainError;
use crate::domain::order::OrderId;
use crate::errors::AppError;
use crate::handlers::{OptionalPageParams, PageParams};
use crate::projection::assembler::{assemble, OrderDto, OrderQueryDto, OrderView};

/// GET /api/v1/orders
///
/// The full entity graph of every order.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "All orders with member, delivery and lines", body = [OrderView]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn orders_v1(service: web::Data<OrderQueryService>) -> Result<HttpResponse, AppError> {
    let service = service.into_inner();
    let orders = web::block(move || service.aggregates(None))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(assemble::<_, OrderView>(&orders)))
}

/// GET /api/v2/orders
#[utoipa::path(
    get,
    path = "/api/v2/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderDto]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn orders_v2(service: web::Data<OrderQueryService>) -> Result<HttpResponse, AppError> {
    let service = service.into_inner();
    let orders = web::block(move || service.aggregates(None))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(assemble::<_, OrderDto>(&orders)))
}

/// GET /api/v3/orders
///
/// One page of orders. Lines are fetched in batches for the page's ids.
#[utoipa::path(
    get,
    path = "/api/v3/orders",
    params(PageParams),
    responses(
        (status = 200, description = "One page of orders", body = [OrderDto]),
        (status = 400, description = "Invalid page window"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn orders_v3(
    service: web::Data<OrderQueryService>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let window = query.window()?;
    let service = service.into_inner();
    let orders = web::block(move || service.aggregates(Some(window)))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(assemble::<_, OrderDto>(&orders)))
}

/// GET /api/v4/orders
///
/// Headers first, then one line query per order.
#[utoipa::path(
    get,
    path = "/api/v4/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderQueryDto]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn orders_v4(service: web::Data<OrderQueryService>) -> Result<HttpResponse, AppError> {
    let service = service.into_inner();
    let orders = web::block(move || service.aggregates_per_header())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(assemble::<_, OrderQueryDto>(&orders)))
}

/// GET /api/v5/orders
///
/// Headers first, then lines for all of them in batches.
#[utoipa::path(
    get,
    path = "/api/v5/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderQueryDto]),
        (status = 400, description = "Batch exceeds the configured cap"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn orders_v5(service: web::Data<OrderQueryService>) -> Result<HttpResponse, AppError> {
    let service = service.into_inner();
    let orders = web::block(move || service.aggregates_batched())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(assemble::<_, OrderQueryDto>(&orders)))
}

/// GET /api/v6/orders
///
/// A single joined query grouped in memory. Any `offset` or `limit` is
/// refused, whatever its value.
#[utoipa::path(
    get,
    path = "/api/v6/orders",
    params(OptionalPageParams),
    responses(
        (status = 200, description = "All orders", body = [OrderQueryDto]),
        (status = 400, description = "Pagination requested"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn orders_v6(
    service: web::Data<OrderQueryService>,
    query: web::Query<OptionalPageParams>,
) -> Result<HttpResponse, AppError> {
    if query.offset.is_some() || query.limit.is_some() {
        return Err(DomainError::UnsupportedPagination.into());
    }
    let service = service.into_inner();
    let orders = web::block(move || service.aggregates_flat(None))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(assemble::<_, OrderQueryDto>(&orders)))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderView),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderQueryService>,
    path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let service = service.into_inner();
    let order = web::block(move || service.find_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderView::from(&order)))
}

/// POST /api/orders/{id}/cancel
///
/// Cancels the order and puts each line's quantity back in stock.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order cancelled", body = OrderView),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already delivered or cancelled"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    service: web::Data<OrderQueryService>,
    path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let service = service.into_inner();
    let order = web::block(move || service.cancel_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderView::from(&order)))
}
