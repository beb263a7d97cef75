use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{Member, OrderAggregate, OrderHeader, OrderId};
use crate::domain::page::PageWindow;
use crate::domain::ports::{OrderStore, RowSource, UnitOfWork};
use crate::projection::OrderProjector;

/// Entry point for every order read plus cancel. Inputs arrive validated, and
/// anything the projector would refuse is refused here before a scope opens.
#[derive(Clone)]
pub struct OrderQueryService {
    store: Arc<dyn OrderStore>,
    projector: OrderProjector,
}

impl OrderQueryService {
    pub fn new<S: OrderStore>(store: S, projector: OrderProjector) -> Self {
        Self {
            store: Arc::new(store),
            projector,
        }
    }

    /// Header, member, delivery and lines. Paginated reads batch the lines;
    /// unpaginated reads use the flat join.
    pub fn aggregates(
        &self,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderAggregate>, DomainError> {
        self.read(|source| self.projector.aggregates(source, window))
    }

    /// One line query per order.
    pub fn aggregates_per_header(&self) -> Result<Vec<OrderAggregate>, DomainError> {
        self.read(|source| self.projector.per_header(source))
    }

    /// Headers, then lines in batches.
    pub fn aggregates_batched(&self) -> Result<Vec<OrderAggregate>, DomainError> {
        self.read(|source| self.projector.batched(source, None))
    }

    pub fn aggregates_flat(
        &self,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderAggregate>, DomainError> {
        if window.is_some() {
            return Err(DomainError::UnsupportedPagination);
        }
        self.read(|source| self.projector.flat(source, None))
    }

    pub fn headers(&self, window: Option<PageWindow>) -> Result<Vec<OrderHeader>, DomainError> {
        self.read(|source| self.projector.headers(source, window))
    }

    pub fn find_order(&self, order_id: OrderId) -> Result<OrderAggregate, DomainError> {
        self.read(|source| self.projector.one(source, order_id))
    }

    pub fn members(&self) -> Result<Vec<Member>, DomainError> {
        self.read(|source| source.members())
    }

    /// Cancels inside one write transaction. On `IllegalCancel` nothing is
    /// written.
    pub fn cancel_order(&self, order_id: OrderId) -> Result<OrderAggregate, DomainError> {
        self.write(|uow| {
            let mut order = self.projector.one(uow.rows(), order_id)?;
            order.cancel(&mut *uow)?;
            uow.update_order_status(order_id, order.header().status)?;
            log::info!("order {order_id} cancelled");
            Ok(order)
        })
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&mut dyn RowSource) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut output = None;
        self.store.read_scope(Box::new(|source: &mut dyn RowSource| {
            output = Some(f(source)?);
            Ok(())
        }))?;
        output.ok_or_else(|| DomainError::Internal("read scope did not run".to_string()))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut dyn UnitOfWork) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut output = None;
        self.store.write_scope(Box::new(|uow: &mut dyn UnitOfWork| {
            output = Some(f(uow)?);
            Ok(())
        }))?;
        output.ok_or_else(|| DomainError::Internal("write scope did not run".to_string()))
    }
}
