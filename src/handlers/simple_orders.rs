use actix_web::{web, HttpResponse};

use crate::application::order_query_service::OrderQueryService;
use crate::errors::AppError;
use crate::handlers::OptionalPageParams;
use crate::projection::assembler::{assemble, OrderHeaderView, SimpleOrderDto};

/// GET /api/v1/simple-orders
///
/// Headers as entities, member and delivery included, no lines.
#[utoipa::path(
    get,
    path = "/api/v1/simple-orders",
    responses(
        (status = 200, description = "All order headers", body = [OrderHeaderView]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "simple-orders"
)]
pub async fn simple_orders_v1(
    service: web::Data<OrderQueryService>,
) -> Result<HttpResponse, AppError> {
    let service = service.into_inner();
    let headers = web::block(move || service.headers(None))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(assemble::<_, OrderHeaderView>(&headers)))
}

/// GET /api/v2/simple-orders
#[utoipa::path(
    get,
    path = "/api/v2/simple-orders",
    responses(
        (status = 200, description = "All order headers", body = [SimpleOrderDto]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "simple-orders"
)]
pub async fn simple_orders_v2(
    service: web::Data<OrderQueryService>,
) -> Result<HttpResponse, AppError> {
    simple_headers(service, OptionalPageParams::default()).await
}

/// GET /api/v3/simple-orders
///
/// Same as v2 but takes an optional page window.
#[utoipa::path(
    get,
    path = "/api/v3/simple-orders",
    params(OptionalPageParams),
    responses(
        (status = 200, description = "Order headers", body = [SimpleOrderDto]),
        (status = 400, description = "Invalid page window"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "simple-orders"
)]
pub async fn simple_orders_v3(
    service: web::Data<OrderQueryService>,
    query: web::Query<OptionalPageParams>,
) -> Result<HttpResponse, AppError> {
    simple_headers(service, query.into_inner()).await
}

/// GET /api/v4/simple-orders
#[utoipa::path(
    get,
    path = "/api/v4/simple-orders",
    responses(
        (status = 200, description = "All order headers", body = [SimpleOrderDto]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "simple-orders"
)]
pub async fn simple_orders_v4(
    service: web::Data<OrderQueryService>,
) -> Result<HttpResponse, AppError> {
    simple_headers(service, OptionalPageParams::default()).await
}

async fn simple_headers(
    service: web::Data<OrderQueryService>,
    params: OptionalPageParams,
) -> Result<HttpResponse, AppError> {
    let window = params.window()?;
    let service = service.into_inner();
    let headers = web::block(move || service.headers(window))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(assemble::<_, SimpleOrderDto>(&headers)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    use crate::handlers::configure;
    use crate::handlers::test_support::service;

    async fn get(uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service()))
                .configure(configure),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn simple_dto_has_only_header_fields() {
        let (status, body) = get("/api/v2/simple-orders").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        let first = body[0].as_object().unwrap();
        let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["address", "name", "orderDate", "orderId", "orderStatus"]
        );
        assert_eq!(
            body[0]["address"],
            json!({"city": "Seoul", "street": "street-1", "zipcode": "04524"})
        );
    }

    #[actix_web::test]
    async fn v1_includes_member_and_delivery() {
        let (_, body) = get("/api/v1/simple-orders").await;

        assert_eq!(body[1]["member"]["name"], "member-2");
        assert_eq!(body[1]["delivery"]["status"], "COMP");
        assert!(body[1].get("orderItems").is_none());
    }

    #[actix_web::test]
    async fn v3_applies_window() {
        let (status, body) = get("/api/v3/simple-orders?offset=1&limit=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["orderId"], 2);
    }

    #[actix_web::test]
    async fn v3_rejects_negative_offset() {
        let (status, _) = get("/api/v3/simple-orders?offset=-1").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn all_simple_versions_agree() {
        let (_, v2) = get("/api/v2/simple-orders").await;
        let (_, v3) = get("/api/v3/simple-orders").await;
        let (_, v4) = get("/api/v4/simple-orders").await;

        assert_eq!(v2, v3);
        assert_eq!(v2, v4);
    }
}
