//! In-memory store with the same ordering guarantees as the diesel store.
//! Counts round trips so tests can assert query budgets.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::order::fixtures;
use crate::domain::order::{
    DeliveryStatus, FlatProjectionRow, ItemId, Member, OrderHeader, OrderId, OrderLine,
    OrderStatus,
};
use crate::domain::page::PageWindow;
use crate::domain::ports::{
    InventoryRestore, OrderStore, ReadWork, RowSource, UnitOfWork, WriteWork,
};

pub const INITIAL_STOCK: i32 = 10;

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub headers: Vec<OrderHeader>,
    pub lines: Vec<OrderLine>,
    pub members: Vec<Member>,
    pub stock: HashMap<ItemId, i32>,
    /// Makes the header query return every row twice.
    pub duplicate_header_rows: bool,
    /// Makes every query fail like an unreachable database.
    pub fail_queries: bool,
    next_line_id: i64,
}

impl MemoryState {
    /// Adds an order whose lines are `(unit_price, count)` pairs, created in
    /// the given order.
    pub fn add_order(
        &mut self,
        id: OrderId,
        delivery_status: DeliveryStatus,
        lines: &[(i32, i32)],
    ) {
        let header = fixtures::header(id, delivery_status);
        self.members.push(header.member.clone());
        for &(price, count) in lines {
            self.next_line_id += 1;
            let line = fixtures::line(self.next_line_id, id, price, count);
            self.stock.insert(line.item.id, INITIAL_STOCK);
            self.lines.push(line);
        }
        self.headers.push(header);
        self.headers.sort_by_key(|h| h.id);
    }

    pub fn source(&mut self) -> MemorySource<'_> {
        MemorySource {
            state: self,
            round_trips: 0,
            batch_sizes: Vec::new(),
        }
    }

    fn lines_of(&self, order_id: OrderId) -> Vec<OrderLine> {
        let mut lines: Vec<OrderLine> = self
            .lines
            .iter()
            .filter(|l| l.order_id == order_id)
            .cloned()
            .collect();
        lines.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        lines
    }
}

pub struct MemorySource<'a> {
    state: &'a mut MemoryState,
    round_trips: usize,
    batch_sizes: Vec<usize>,
}

impl MemorySource<'_> {
    pub fn round_trips(&self) -> usize {
        self.round_trips
    }

    /// Number of ids in each `order_lines` call, in call order.
    pub fn batch_sizes(&self) -> &[usize] {
        &self.batch_sizes
    }

    fn query(&mut self) -> Result<(), DomainError> {
        if self.state.fail_queries {
            return Err(DomainError::Internal("storage unavailable".to_string()));
        }
        self.round_trips += 1;
        Ok(())
    }
}

impl RowSource for MemorySource<'_> {
    fn order_headers(
        &mut self,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderHeader>, DomainError> {
        self.query()?;
        let mut headers = self.state.headers.clone();
        if self.state.duplicate_header_rows {
            headers = headers.into_iter().flat_map(|h| [h.clone(), h]).collect();
        }
        if let Some(w) = window {
            headers = headers
                .into_iter()
                .skip(w.offset() as usize)
                .take(w.limit() as usize)
                .collect();
        }
        Ok(headers)
    }

    fn order_header(&mut self, order_id: OrderId) -> Result<Option<OrderHeader>, DomainError> {
        self.query()?;
        Ok(self.state.headers.iter().find(|h| h.id == order_id).cloned())
    }

    fn order_lines(&mut self, order_ids: &[OrderId]) -> Result<Vec<OrderLine>, DomainError> {
        self.query()?;
        self.batch_sizes.push(order_ids.len());
        let mut ids = order_ids.to_vec();
        ids.sort_unstable();
        Ok(ids.into_iter().flat_map(|id| self.state.lines_of(id)).collect())
    }

    fn flat_rows(&mut self) -> Result<Vec<FlatProjectionRow>, DomainError> {
        self.query()?;
        let mut rows = Vec::new();
        for header in &self.state.headers {
            let lines = self.state.lines_of(header.id);
            if lines.is_empty() {
                rows.push(FlatProjectionRow {
                    header: header.clone(),
                    line: None,
                });
            }
            rows.extend(lines.into_iter().map(|line| FlatProjectionRow {
                header: header.clone(),
                line: Some(line),
            }));
        }
        Ok(rows)
    }

    fn members(&mut self) -> Result<Vec<Member>, DomainError> {
        self.query()?;
        let mut members = self.state.members.clone();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }
}

impl InventoryRestore for MemorySource<'_> {
    fn restore_stock(&mut self, item_id: ItemId, count: i32) -> Result<(), DomainError> {
        self.query()?;
        *self.state.stock.entry(item_id).or_insert(0) += count;
        Ok(())
    }
}

impl UnitOfWork for MemorySource<'_> {
    fn rows(&mut self) -> &mut dyn RowSource {
        self
    }

    fn update_order_status(
        &mut self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), DomainError> {
        self.query()?;
        let header = self
            .state
            .headers
            .iter_mut()
            .find(|h| h.id == order_id)
            .ok_or(DomainError::NotFound(order_id))?;
        header.status = status;
        Ok(())
    }
}

/// Shared store whose write scopes work on a copy and commit only on `Ok`.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    state: Mutex<MemoryState>,
    round_trips: AtomicUsize,
}

impl MemoryOrderStore {
    pub fn new(state: MemoryState) -> Self {
        Self {
            state: Mutex::new(state),
            round_trips: AtomicUsize::new(0),
        }
    }

    pub fn round_trips(&self) -> usize {
        self.round_trips.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> MemoryState {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl OrderStore for MemoryOrderStore {
    fn read_scope(&self, work: ReadWork<'_>) -> Result<(), DomainError> {
        let mut state = self.lock();
        let mut source = state.source();
        let result = work(&mut source);
        self.round_trips
            .fetch_add(source.round_trips(), Ordering::SeqCst);
        result
    }

    fn write_scope(&self, work: WriteWork<'_>) -> Result<(), DomainError> {
        let mut state = self.lock();
        let mut working = state.clone();
        let mut source = working.source();
        let result = work(&mut source);
        self.round_trips
            .fetch_add(source.round_trips(), Ordering::SeqCst);
        if result.is_ok() {
            *state = working;
        }
        result
    }
}
