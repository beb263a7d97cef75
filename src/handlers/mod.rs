pub mod members;
pub mod orders;
pub mod simple_orders;

use actix_web::web;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::errors::DomainError;
use crate::domain::page::PageWindow;

pub const DEFAULT_LIMIT: i64 = 100;

/// Registers every route under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/v1/orders", web::get().to(orders::orders_v1))
            .route("/v2/orders", web::get().to(orders::orders_v2))
            .route("/v3/orders", web::get().to(orders::orders_v3))
            .route("/v4/orders", web::get().to(orders::orders_v4))
            .route("/v5/orders", web::get().to(orders::orders_v5))
            .route("/v6/orders", web::get().to(orders::orders_v6))
            .route("/orders/{id}", web::get().to(orders::get_order))
            .route("/orders/{id}/cancel", web::post().to(orders::cancel_order))
            .route("/v1/simple-orders", web::get().to(simple_orders::simple_orders_v1))
            .route("/v2/simple-orders", web::get().to(simple_orders::simple_orders_v2))
            .route("/v3/simple-orders", web::get().to(simple_orders::simple_orders_v3))
            .route("/v4/simple-orders", web::get().to(simple_orders::simple_orders_v4))
            .route("/v2/members", web::get().to(members::members_v2)),
    );
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Rows to skip. Defaults to 0.
    #[serde(default)]
    pub offset: i64,
    /// Page size, 1 to 1000. Defaults to 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl PageParams {
    pub fn window(&self) -> Result<PageWindow, DomainError> {
        PageWindow::new(self.offset, self.limit)
    }
}

/// Page parameters that may be left out entirely.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OptionalPageParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl OptionalPageParams {
    /// `None` when neither parameter was sent.
    pub fn window(&self) -> Result<Option<PageWindow>, DomainError> {
        if self.offset.is_none() && self.limit.is_none() {
            return Ok(None);
        }
        PageWindow::new(self.offset.unwrap_or(0), self.limit.unwrap_or(DEFAULT_LIMIT)).map(Some)
    }
}
