use std::collections::{HashMap, HashSet};

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderAggregate, OrderHeader, OrderId, OrderLine};
use crate::domain::ports::RowSource;

/// Upper bound on ids in one `IN (...)` fetch, whatever the configuration says.
pub const MAX_BATCH_SIZE: usize = 1000;

/// What to do when more ids are requested than fit in one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOverflow {
    /// Issue `ceil(ids / batch_size)` fetches.
    Split,
    /// Fail with `BatchTooLarge` before querying.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    pub size: usize,
    pub overflow: BatchOverflow,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            size: 100,
            overflow: BatchOverflow::Split,
        }
    }
}

/// Loads the lines of many orders with one query per batch of order ids
/// instead of one query per order.
#[derive(Debug, Clone, Copy)]
pub struct BatchCollectionLoader {
    config: BatchConfig,
}

impl BatchCollectionLoader {
    pub fn new(config: BatchConfig) -> Self {
        let size = config.size.clamp(1, MAX_BATCH_SIZE);
        if size != config.size {
            log::warn!("batch size {} is outside 1..={MAX_BATCH_SIZE}, using {size}", config.size);
        }
        Self {
            config: BatchConfig { size, ..config },
        }
    }

    /// Maps every requested id to its lines, newest first. Ids without lines
    /// map to an empty list.
    pub fn load(
        &self,
        source: &mut dyn RowSource,
        order_ids: &[OrderId],
    ) -> Result<HashMap<OrderId, Vec<OrderLine>>, DomainError> {
        let mut seen = HashSet::with_capacity(order_ids.len());
        let ids: Vec<OrderId> = order_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let cap = self.config.size;
        if ids.len() > cap && self.config.overflow == BatchOverflow::Reject {
            return Err(DomainError::BatchTooLarge {
                requested: ids.len(),
                cap,
            });
        }

        let mut by_order: HashMap<OrderId, Vec<OrderLine>> =
            ids.iter().map(|id| (*id, Vec::new())).collect();

        let mut round_trips = 0;
        for chunk in ids.chunks(cap) {
            let lines = source.order_lines(chunk)?;
            round_trips += 1;
            for line in lines {
                match by_order.get_mut(&line.order_id) {
                    Some(bucket) => bucket.push(line),
                    None => {
                        return Err(DomainError::DataIntegrity(format!(
                            "line {} for order {} was not requested",
                            line.id, line.order_id
                        )))
                    }
                }
            }
        }

        log::debug!(
            "batch loaded lines for {} orders in {} round trip(s)",
            ids.len(),
            round_trips
        );
        Ok(by_order)
    }

    /// Loads lines for `headers` and builds one aggregate per header, keeping
    /// header order.
    pub fn attach(
        &self,
        source: &mut dyn RowSource,
        headers: Vec<OrderHeader>,
    ) -> Result<Vec<OrderAggregate>, DomainError> {
        let ids: Vec<OrderId> = headers.iter().map(|h| h.id).collect();
        let mut by_order = self.load(source, &ids)?;

        headers
            .into_iter()
            .map(|header| {
                let lines = by_order.remove(&header.id).unwrap_or_default();
                OrderAggregate::new(header, lines)
            })
            .collect()
    }
}

impl Default for BatchCollectionLoader {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}
