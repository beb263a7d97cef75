use utoipa::OpenApi;

use crate::domain::order::{Address, DeliveryStatus, OrderStatus};
use crate::handlers::{members, orders, simple_orders};
use crate::projection::assembler::{
    DeliveryView, ItemView, MemberDto, MemberListResponse, MemberView, OrderDto,
    OrderHeaderView, OrderItemDto, OrderItemQueryDto, OrderLineView, OrderQueryDto, OrderView,
    SimpleOrderDto,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Order query service"),
    paths(
        orders::orders_v1,
        orders::orders_v2,
        orders::orders_v3,
        orders::orders_v4,
        orders::orders_v5,
        orders::orders_v6,
        orders::get_order,
        orders::cancel_order,
        simple_orders::simple_orders_v1,
        simple_orders::simple_orders_v2,
        simple_orders::simple_orders_v3,
        simple_orders::simple_orders_v4,
        members::members_v2,
    ),
    components(schemas(
        Address,
        OrderStatus,
        DeliveryStatus,
        MemberView,
        DeliveryView,
        ItemView,
        OrderLineView,
        OrderHeaderView,
        OrderView,
        OrderItemDto,
        OrderDto,
        OrderItemQueryDto,
        OrderQueryDto,
        SimpleOrderDto,
        MemberDto,
        MemberListResponse,
    )),
    tags(
        (name = "orders", description = "Order aggregates"),
        (name = "simple-orders", description = "Order headers without lines"),
        (name = "members", description = "Members"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for v in 1..=6 {
            assert!(paths.contains(&format!("/api/v{v}/orders").as_str()), "v{v}");
        }
        for v in 1..=4 {
            assert!(paths.contains(&format!("/api/v{v}/simple-orders").as_str()), "v{v}");
        }
        assert!(paths.contains(&"/api/orders/{id}/cancel"));
        assert!(paths.contains(&"/api/v2/members"));
    }
}
