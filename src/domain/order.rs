use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::errors::DomainError;
use super::ports::InventoryRestore;

pub type OrderId = i64;
pub type OrderLineId = i64;
pub type MemberId = i64;
pub type DeliveryId = i64;
pub type ItemId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Order,
    Cancel,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Order => "ORDER",
            OrderStatus::Cancel => "CANCEL",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORDER" => Ok(OrderStatus::Order),
            "CANCEL" => Ok(OrderStatus::Cancel),
            other => Err(DomainError::DataIntegrity(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeliveryStatus {
    Ready,
    Comp,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Ready => "READY",
            DeliveryStatus::Comp => "COMP",
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READY" => Ok(DeliveryStatus::Ready),
            "COMP" => Ok(DeliveryStatus::Comp),
            other => Err(DomainError::DataIntegrity(format!(
                "unknown delivery status '{other}'"
            ))),
        }
    }
}

/// Postal address embedded in a delivery. Compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub zipcode: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub id: DeliveryId,
    pub address: Address,
    pub status: DeliveryStatus,
}

/// An order header with its to-one relations already resolved.
///
/// Member and delivery are held by value, so a header can only exist once
/// both have been loaded inside a storage scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHeader {
    pub id: OrderId,
    pub member: Member,
    pub delivery: Delivery,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub id: OrderLineId,
    /// Back-reference to the owning header. Used for consistency checks only.
    pub order_id: OrderId,
    pub item: Item,
    pub unit_price: i32,
    pub count: i32,
    pub created_at: DateTime<Utc>,
}

impl OrderLine {
    pub fn total_price(&self) -> i64 {
        i64::from(self.unit_price) * i64::from(self.count)
    }
}

/// A header plus the lines it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAggregate {
    header: OrderHeader,
    lines: Vec<OrderLine>,
}

impl OrderAggregate {
    /// Builds an aggregate, rejecting any line whose back-reference points at
    /// a different header.
    pub fn new(header: OrderHeader, lines: Vec<OrderLine>) -> Result<Self, DomainError> {
        if let Some(stray) = lines.iter().find(|l| l.order_id != header.id) {
            return Err(DomainError::DataIntegrity(format!(
                "line {} belongs to order {} but was attached to order {}",
                stray.id, stray.order_id, header.id
            )));
        }
        Ok(Self { header, lines })
    }

    pub fn header(&self) -> &OrderHeader {
        &self.header
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total_price(&self) -> i64 {
        self.lines.iter().map(OrderLine::total_price).sum()
    }

    /// `ORDER -> CANCEL`. A completed delivery or an already cancelled order
    /// cannot be cancelled; on failure nothing is restored and the status is
    /// left untouched.
    pub fn cancel<R>(&mut self, inventory: &mut R) -> Result<(), DomainError>
    where
        R: InventoryRestore + ?Sized,
    {
        if self.header.delivery.status == DeliveryStatus::Comp {
            return Err(DomainError::IllegalCancel(format!(
                "order {} has already been delivered",
                self.header.id
            )));
        }
        if self.header.status == OrderStatus::Cancel {
            return Err(DomainError::IllegalCancel(format!(
                "order {} is already cancelled",
                self.header.id
            )));
        }

        for line in &self.lines {
            inventory.restore_stock(line.item.id, line.count)?;
        }
        self.header.status = OrderStatus::Cancel;
        Ok(())
    }
}

/// One row of the wide header x line join. Header fields repeat on every row
/// of the same order; `line` is absent for an order without lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatProjectionRow {
    pub header: OrderHeader,
    pub line: Option<OrderLine>,
}
