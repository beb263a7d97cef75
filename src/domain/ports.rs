use super::errors::DomainError;
use super::order::{
    FlatProjectionRow, ItemId, Member, OrderHeader, OrderId, OrderLine, OrderStatus,
};
use super::page::PageWindow;

/// Read access to the order tables. Every call is one round trip to storage
/// and returns rows in a stable order.
pub trait RowSource {
    /// Headers joined to member and delivery, ordered by order id.
    fn order_headers(&mut self, window: Option<PageWindow>)
        -> Result<Vec<OrderHeader>, DomainError>;

    fn order_header(&mut self, order_id: OrderId) -> Result<Option<OrderHeader>, DomainError>;

    /// Lines joined to their item for every order in `order_ids`, ordered by
    /// order id, then newest line first.
    fn order_lines(&mut self, order_ids: &[OrderId]) -> Result<Vec<OrderLine>, DomainError>;

    /// The whole header x line join, one row per line (one row without a
    /// line for an order that has none), in the same order as `order_lines`.
    fn flat_rows(&mut self) -> Result<Vec<FlatProjectionRow>, DomainError>;

    fn members(&mut self) -> Result<Vec<Member>, DomainError>;
}

/// Hook invoked once per line when an order is cancelled.
pub trait InventoryRestore {
    fn restore_stock(&mut self, item_id: ItemId, count: i32) -> Result<(), DomainError>;
}

/// Read-write access inside a single transaction.
pub trait UnitOfWork: RowSource + InventoryRestore {
    fn rows(&mut self) -> &mut dyn RowSource;

    fn update_order_status(
        &mut self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), DomainError>;
}

pub type ReadWork<'a> = Box<dyn FnOnce(&mut dyn RowSource) -> Result<(), DomainError> + 'a>;
pub type WriteWork<'a> = Box<dyn FnOnce(&mut dyn UnitOfWork) -> Result<(), DomainError> + 'a>;

/// Opens storage scopes. Everything read inside a scope is fully materialized
/// before the scope closes; nothing escapes it unresolved.
pub trait OrderStore: Send + Sync + 'static {
    fn read_scope(&self, work: ReadWork<'_>) -> Result<(), DomainError>;

    /// Runs `work` in one transaction, committed only when it returns `Ok`.
    fn write_scope(&self, work: WriteWork<'_>) -> Result<(), DomainError>;
}
