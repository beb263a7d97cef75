//! Read-side loading of order aggregates.
//!
//! `OrderProjector` picks a [`QueryStrategy`] from the request shape and runs
//! the matching loaders against a [`RowSource`] that the caller keeps inside
//! one storage scope.

pub mod assembler;
pub mod batch;
pub mod eager;
pub mod flat;
pub mod strategy;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderAggregate, OrderHeader, OrderId};
use crate::domain::page::PageWindow;
use crate::domain::ports::RowSource;

pub use batch::{BatchCollectionLoader, BatchConfig, BatchOverflow, MAX_BATCH_SIZE};
pub use eager::EagerJoinLoader;
pub use flat::FlatProjectionReducer;
pub use strategy::{QueryStrategy, RequestShape};

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderProjector {
    eager: EagerJoinLoader,
    batch: BatchCollectionLoader,
    flat: FlatProjectionReducer,
}

impl OrderProjector {
    pub fn new(batch: BatchConfig) -> Self {
        Self {
            eager: EagerJoinLoader,
            batch: BatchCollectionLoader::new(batch),
            flat: FlatProjectionReducer,
        }
    }

    /// Headers only. Always the to-one join.
    pub fn headers(
        &self,
        source: &mut dyn RowSource,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderHeader>, DomainError> {
        let strategy = RequestShape::headers(window).strategy();
        log::debug!("loading order headers with {strategy}");
        self.eager.load(source, window)
    }

    /// Full aggregates; batch when paginated, flat otherwise.
    pub fn aggregates(
        &self,
        source: &mut dyn RowSource,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderAggregate>, DomainError> {
        let strategy = RequestShape::aggregates(window).strategy();
        log::debug!("loading order aggregates with {strategy}");
        match strategy {
            QueryStrategy::FlatSingleQuery => self.flat.load(source, window),
            QueryStrategy::EagerToOnePlusBatchCollection | QueryStrategy::EagerToOneOnly => {
                self.batched(source, window)
            }
        }
    }

    /// To-one join then batched line fetch, whether or not a window is given.
    pub fn batched(
        &self,
        source: &mut dyn RowSource,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderAggregate>, DomainError> {
        let headers = self.eager.load(source, window)?;
        self.batch.attach(source, headers)
    }

    /// Single wide join, regrouped in memory.
    pub fn flat(
        &self,
        source: &mut dyn RowSource,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderAggregate>, DomainError> {
        self.flat.load(source, window)
    }

    /// To-one join then one line query per header: `1 + N` round trips.
    pub fn per_header(
        &self,
        source: &mut dyn RowSource,
    ) -> Result<Vec<OrderAggregate>, DomainError> {
        let headers = self.eager.load(source, None)?;
        let mut orders = Vec::with_capacity(headers.len());
        for header in headers {
            let lines = source.order_lines(&[header.id])?;
            orders.push(OrderAggregate::new(header, lines)?);
        }
        Ok(orders)
    }

    /// One aggregate by id, or `NotFound`.
    pub fn one(
        &self,
        source: &mut dyn RowSource,
        order_id: OrderId,
    ) -> Result<OrderAggregate, DomainError> {
        let header = source
            .order_header(order_id)?
            .ok_or(DomainError::NotFound(order_id))?;
        let mut orders = self.batch.attach(source, vec![header])?;
        orders.pop().ok_or_else(|| {
            DomainError::Internal(format!("order {order_id} vanished while loading"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::DeliveryStatus;
    use crate::infrastructure::memory_store::MemoryState;

    /// Compares strategies as sets of (header, sorted line ids).
    fn semantic(orders: &[OrderAggregate]) -> Vec<(OrderHeader, Vec<i64>)> {
        let mut out: Vec<_> = orders
            .iter()
            .map(|o| {
                let mut lines: Vec<i64> = o.lines().iter().map(|l| l.id).collect();
                lines.sort_unstable();
                (o.header().clone(), lines)
            })
            .collect();
        out.sort_by_key(|(h, _)| h.id);
        out
    }

    fn shop() -> MemoryState {
        let mut state = MemoryState::default();
        state.add_order(1, DeliveryStatus::Ready, &[(1000, 2), (500, 3)]);
        state.add_order(2, DeliveryStatus::Ready, &[]);
        state.add_order(3, DeliveryStatus::Comp, &[(20000, 1), (40000, 1), (10000, 4)]);
        state
    }

    #[test]
    fn batch_and_flat_strategies_agree() {
        let mut state = shop();
        let projector = OrderProjector::default();

        let batched = projector.batched(&mut state.source(), None).unwrap();
        let flat = projector.flat(&mut state.source(), None).unwrap();
        let per_header = projector.per_header(&mut state.source()).unwrap();

        assert_eq!(semantic(&batched), semantic(&flat));
        assert_eq!(semantic(&batched), semantic(&per_header));
        assert_eq!(batched, flat);
    }

    #[test]
    fn unpaginated_aggregates_use_one_round_trip() {
        let mut state = shop();
        let mut source = state.source();

        let orders = OrderProjector::default().aggregates(&mut source, None).unwrap();

        assert_eq!(orders.len(), 3);
        assert_eq!(source.round_trips(), 1);
    }

    #[test]
    fn paginated_aggregates_use_two_round_trips() {
        let mut state = shop();
        let mut source = state.source();

        let orders = OrderProjector::default()
            .aggregates(&mut source, Some(PageWindow::new(0, 1).unwrap()))
            .unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].header().id, 1);
        assert_eq!(orders[0].lines().len(), 2);
        assert_eq!(source.round_trips(), 2);
    }

    #[test]
    fn small_batch_size_bounds_each_fetch() {
        let mut state = shop();
        let mut source = state.source();
        let projector = OrderProjector::new(BatchConfig {
            size: 2,
            overflow: BatchOverflow::Split,
        });

        let orders = projector.batched(&mut source, None).unwrap();

        assert_eq!(orders.len(), 3);
        assert_eq!(source.batch_sizes(), &[2, 1]);
        assert_eq!(source.round_trips(), 3);
    }

    #[test]
    fn per_header_costs_one_query_per_order() {
        let mut state = shop();
        let mut source = state.source();

        OrderProjector::default().per_header(&mut source).unwrap();

        assert_eq!(source.round_trips(), 1 + 3);
    }

    #[test]
    fn headers_never_multiply() {
        let mut state = shop();
        let mut source = state.source();

        let headers = OrderProjector::default().headers(&mut source, None).unwrap();

        let ids: Vec<OrderId> = headers.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(source.round_trips(), 1);
    }

    #[test]
    fn one_returns_not_found_for_missing_order() {
        let mut state = shop();

        let err = OrderProjector::default()
            .one(&mut state.source(), 99)
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(99)));
    }

    #[test]
    fn one_loads_lines() {
        let mut state = shop();

        let order = OrderProjector::default().one(&mut state.source(), 3).unwrap();

        assert_eq!(order.lines().len(), 3);
        assert_eq!(order.total_price(), 100000);
    }
}
