use std::collections::{HashMap, HashSet};

use crate::domain::errors::DomainError;
use crate::domain::order::{
    FlatProjectionRow, OrderAggregate, OrderHeader, OrderId, OrderLine, OrderLineId,
};
use crate::domain::page::PageWindow;
use crate::domain::ports::RowSource;

/// Loads headers and lines through a single wide join and regroups the rows
/// into aggregates in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatProjectionReducer;

impl FlatProjectionReducer {
    /// Exactly one round trip. Any window is refused before querying: an
    /// offset or limit over line-multiplied rows would cut an order in half.
    pub fn load(
        &self,
        source: &mut dyn RowSource,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderAggregate>, DomainError> {
        if window.is_some() {
            return Err(DomainError::UnsupportedPagination);
        }
        let rows = source.flat_rows()?;
        log::debug!("flat join returned {} rows", rows.len());
        self.reduce(rows)
    }

    /// Groups rows by order id only, in first-seen order. Lines keep stream
    /// order; a line id seen twice in one group is a join duplicate and is
    /// dropped. Rows of one order that disagree on a header field are an error.
    pub fn reduce(&self, rows: Vec<FlatProjectionRow>) -> Result<Vec<OrderAggregate>, DomainError> {
        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<OrderId, usize> = HashMap::new();

        for FlatProjectionRow { header, line } in rows {
            let slot = match index.get(&header.id) {
                Some(&slot) => {
                    let first = &groups[slot].header;
                    if *first != header {
                        return Err(DomainError::DataIntegrity(format!(
                            "rows for order {} disagree on header fields",
                            header.id
                        )));
                    }
                    slot
                }
                None => {
                    index.insert(header.id, groups.len());
                    groups.push(Group::new(header));
                    groups.len() - 1
                }
            };

            if let Some(line) = line {
                groups[slot].push(line);
            }
        }

        groups
            .into_iter()
            .map(|g| OrderAggregate::new(g.header, g.lines))
            .collect()
    }
}

struct Group {
    header: OrderHeader,
    lines: Vec<OrderLine>,
    line_ids: HashSet<OrderLineId>,
}

impl Group {
    fn new(header: OrderHeader) -> Self {
        Self {
            header,
            lines: Vec::new(),
            line_ids: HashSet::new(),
        }
    }

    fn push(&mut self, line: OrderLine) {
        if self.line_ids.insert(line.id) {
            self.lines.push(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::fixtures::{header, line};
    use crate::domain::order::{DeliveryStatus, OrderStatus};
    use crate::infrastructure::memory_store::MemoryState;

    fn row(order_id: OrderId, line: Option<OrderLine>) -> FlatProjectionRow {
        FlatProjectionRow {
            header: header(order_id, DeliveryStatus::Ready),
            line,
        }
    }

    #[test]
    fn groups_rows_by_order_id_in_first_seen_order() {
        let rows = vec![
            row(2, Some(line(5, 2, 10, 1))),
            row(1, Some(line(2, 1, 1000, 2))),
            row(2, Some(line(4, 2, 20, 1))),
            row(1, Some(line(1, 1, 500, 3))),
        ];

        let orders = FlatProjectionReducer.reduce(rows).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].header().id, 2);
        assert_eq!(orders[1].header().id, 1);
        let ids: Vec<i64> = orders[0].lines().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![5, 4]);
        assert_eq!(orders[1].total_price(), 3500);
    }

    #[test]
    fn order_without_lines_becomes_empty_aggregate() {
        let orders = FlatProjectionReducer.reduce(vec![row(7, None)]).unwrap();

        assert_eq!(orders.len(), 1);
        assert!(orders[0].lines().is_empty());
    }

    #[test]
    fn repeated_line_row_is_collapsed() {
        let rows = vec![
            row(1, Some(line(1, 1, 100, 1))),
            row(1, Some(line(1, 1, 100, 1))),
        ];

        let orders = FlatProjectionReducer.reduce(rows).unwrap();

        assert_eq!(orders[0].lines().len(), 1);
    }

    #[test]
    fn distinct_lines_with_equal_values_are_both_kept() {
        let mut twin = line(2, 1, 100, 1);
        twin.item = line(1, 1, 100, 1).item;
        let rows = vec![row(1, Some(line(1, 1, 100, 1))), row(1, Some(twin))];

        let orders = FlatProjectionReducer.reduce(rows).unwrap();

        assert_eq!(orders[0].lines().len(), 2);
    }

    #[test]
    fn header_mismatch_within_group_is_rejected() {
        let mut disagreeing = row(1, Some(line(2, 1, 100, 1)));
        disagreeing.header.status = OrderStatus::Cancel;
        let rows = vec![row(1, Some(line(1, 1, 100, 1))), disagreeing];

        let err = FlatProjectionReducer.reduce(rows).unwrap_err();

        assert!(matches!(err, DomainError::DataIntegrity(_)));
    }

    #[test]
    fn any_window_is_rejected_without_querying() {
        let mut state = MemoryState::default();
        state.add_order(1, DeliveryStatus::Ready, &[(100, 1)]);
        let mut source = state.source();

        let err = FlatProjectionReducer
            .load(&mut source, Some(PageWindow::new(0, 10).unwrap()))
            .unwrap_err();

        assert!(matches!(err, DomainError::UnsupportedPagination));
        assert_eq!(source.round_trips(), 0);
    }

    #[test]
    fn load_is_a_single_round_trip() {
        let mut state = MemoryState::default();
        state.add_order(1, DeliveryStatus::Ready, &[(1000, 2), (500, 3)]);
        state.add_order(2, DeliveryStatus::Ready, &[]);
        let mut source = state.source();

        let orders = FlatProjectionReducer.load(&mut source, None).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].lines().len(), 2);
        assert_eq!(source.round_trips(), 1);
    }
}
