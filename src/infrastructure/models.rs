use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    Address, Delivery, FlatProjectionRow, Item, Member, OrderHeader, OrderLine,
};
use crate::schema::{deliveries, items, members, order_items, orders};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub order_id: i64,
    pub member_id: i64,
    pub delivery_id: i64,
    pub status: String,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    pub member_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = deliveries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryRow {
    pub delivery_id: i64,
    pub city: String,
    pub street: String,
    pub zipcode: String,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub order_item_id: i64,
    pub order_id: i64,
    pub item_id: i64,
    pub order_price: i32,
    pub count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    pub item_id: i64,
    pub name: String,
}

pub type HeaderTuple = (OrderRow, MemberRow, DeliveryRow);
pub type LineTuple = (OrderItemRow, ItemRow);
pub type FlatTuple = (
    OrderRow,
    MemberRow,
    DeliveryRow,
    Option<OrderItemRow>,
    Option<ItemRow>,
);

// ── Row → domain ─────────────────────────────────────────────────────────────

impl From<MemberRow> for Member {
    fn from(m: MemberRow) -> Self {
        Member {
            id: m.member_id,
            name: m.name,
        }
    }
}

pub fn header_from_rows(
    (order, member, delivery): HeaderTuple,
) -> Result<OrderHeader, DomainError> {
    if order.member_id != member.member_id || order.delivery_id != delivery.delivery_id {
        return Err(DomainError::DataIntegrity(format!(
            "order {} joined to the wrong member or delivery",
            order.order_id
        )));
    }
    Ok(OrderHeader {
        id: order.order_id,
        member: member.into(),
        delivery: Delivery {
            id: delivery.delivery_id,
            address: Address {
                city: delivery.city,
                street: delivery.street,
                zipcode: delivery.zipcode,
            },
            status: delivery.status.parse()?,
        },
        status: order.status.parse()?,
        order_date: order.order_date,
    })
}

pub fn line_from_rows((line, item): LineTuple) -> OrderLine {
    OrderLine {
        id: line.order_item_id,
        order_id: line.order_id,
        item: Item {
            id: item.item_id,
            name: item.name,
        },
        unit_price: line.order_price,
        count: line.count,
        created_at: line.created_at,
    }
}

pub fn flat_from_rows(
    (order, member, delivery, line, item): FlatTuple,
) -> Result<FlatProjectionRow, DomainError> {
    let header = header_from_rows((order, member, delivery))?;
    let line = match (line, item) {
        (Some(line), Some(item)) => Some(line_from_rows((line, item))),
        (None, None) => None,
        (Some(line), None) => {
            return Err(DomainError::DataIntegrity(format!(
                "line {} references a missing item",
                line.order_item_id
            )))
        }
        (None, Some(item)) => {
            return Err(DomainError::DataIntegrity(format!(
                "item {} joined without a line",
                item.item_id
            )))
        }
    };
    Ok(FlatProjectionRow { header, line })
}
