//! Response shapes, one per endpoint version, built from already loaded
//! aggregates. Line views never carry a serialized link back to their order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::order::{
    Address, DeliveryStatus, Member, OrderAggregate, OrderHeader, OrderId, OrderLine,
    OrderStatus,
};

// ── Entity views (v1) ────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberView {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryView {
    pub id: i64,
    pub address: Address,
    pub status: DeliveryStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemView {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineView {
    pub id: i64,
    pub item: ItemView,
    pub order_price: i32,
    pub count: i32,
    pub total_price: i64,
}

/// Header with its to-one relations, no lines.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeaderView {
    pub id: OrderId,
    pub member: MemberView,
    pub delivery: DeliveryView,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
}

/// The whole aggregate graph.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub member: MemberView,
    pub delivery: DeliveryView,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub order_items: Vec<OrderLineView>,
    pub total_price: i64,
}

impl From<&OrderHeader> for OrderHeaderView {
    fn from(h: &OrderHeader) -> Self {
        Self {
            id: h.id,
            member: MemberView {
                id: h.member.id,
                name: h.member.name.clone(),
            },
            delivery: DeliveryView {
                id: h.delivery.id,
                address: h.delivery.address.clone(),
                status: h.delivery.status,
            },
            status: h.status,
            order_date: h.order_date,
        }
    }
}

impl From<&OrderLine> for OrderLineView {
    fn from(l: &OrderLine) -> Self {
        Self {
            id: l.id,
            item: ItemView {
                id: l.item.id,
                name: l.item.name.clone(),
            },
            order_price: l.unit_price,
            count: l.count,
            total_price: l.total_price(),
        }
    }
}

impl From<&OrderAggregate> for OrderView {
    fn from(o: &OrderAggregate) -> Self {
        let header = OrderHeaderView::from(o.header());
        Self {
            id: header.id,
            member: header.member,
            delivery: header.delivery,
            status: header.status,
            order_date: header.order_date,
            order_items: o.lines().iter().map(OrderLineView::from).collect(),
            total_price: o.total_price(),
        }
    }
}

// ── v2 / v3 ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub item_name: String,
    pub order_price: i32,
    pub count: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: OrderId,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Address,
    pub order_items: Vec<OrderItemDto>,
}

impl From<&OrderLine> for OrderItemDto {
    fn from(l: &OrderLine) -> Self {
        Self {
            item_name: l.item.name.clone(),
            order_price: l.unit_price,
            count: l.count,
        }
    }
}

impl From<&OrderAggregate> for OrderDto {
    fn from(o: &OrderAggregate) -> Self {
        let h = o.header();
        Self {
            order_id: h.id,
            name: h.member.name.clone(),
            order_date: h.order_date,
            order_status: h.status,
            address: h.delivery.address.clone(),
            order_items: o.lines().iter().map(OrderItemDto::from).collect(),
        }
    }
}

// ── v4 / v5 / v6 ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemQueryDto {
    /// Owning order, kept for grouping checks and never serialized.
    #[serde(skip)]
    pub order_id: OrderId,
    pub item_name: String,
    pub order_price: i32,
    pub count: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueryDto {
    pub order_id: OrderId,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Address,
    pub order_items: Vec<OrderItemQueryDto>,
}

impl From<&OrderLine> for OrderItemQueryDto {
    fn from(l: &OrderLine) -> Self {
        Self {
            order_id: l.order_id,
            item_name: l.item.name.clone(),
            order_price: l.unit_price,
            count: l.count,
        }
    }
}

impl From<&OrderAggregate> for OrderQueryDto {
    fn from(o: &OrderAggregate) -> Self {
        let h = o.header();
        Self {
            order_id: h.id,
            name: h.member.name.clone(),
            order_date: h.order_date,
            order_status: h.status,
            address: h.delivery.address.clone(),
            order_items: o.lines().iter().map(OrderItemQueryDto::from).collect(),
        }
    }
}

// ── simple orders ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimpleOrderDto {
    pub order_id: OrderId,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Address,
}

impl From<&OrderHeader> for SimpleOrderDto {
    fn from(h: &OrderHeader) -> Self {
        Self {
            order_id: h.id,
            name: h.member.name.clone(),
            order_date: h.order_date,
            order_status: h.status,
            address: h.delivery.address.clone(),
        }
    }
}

// ── members ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberDto {
    pub name: String,
}

impl From<&Member> for MemberDto {
    fn from(m: &Member) -> Self {
        Self {
            name: m.name.clone(),
        }
    }
}

/// `{"data": [...]}` envelope, so fields can be added next to the list later.
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberListResponse {
    pub data: Vec<MemberDto>,
}

pub fn assemble<'a, S, T>(sources: impl IntoIterator<Item = &'a S>) -> Vec<T>
where
    S: 'a,
    T: From<&'a S>,
{
    sources.into_iter().map(T::from).collect()
}
