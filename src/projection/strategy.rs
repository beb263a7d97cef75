use std::fmt;

use crate::domain::page::PageWindow;

/// How an order read is turned into queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStrategy {
    /// Header joined to member and delivery only. To-one joins never multiply
    /// rows, so the page window applies to the header query directly.
    EagerToOneOnly,
    /// Paginated to-one join, then one `IN (...)` fetch per batch of ids for
    /// the lines.
    EagerToOnePlusBatchCollection,
    /// One wide join over headers and lines, regrouped in memory. Cannot be
    /// paginated.
    FlatSingleQuery,
}

impl QueryStrategy {
    /// Static choice from the request shape alone; result sizes are never
    /// inspected.
    pub fn select(needs_collection: bool, paginated: bool) -> Self {
        match (needs_collection, paginated) {
            (false, _) => QueryStrategy::EagerToOneOnly,
            (true, true) => QueryStrategy::EagerToOnePlusBatchCollection,
            (true, false) => QueryStrategy::FlatSingleQuery,
        }
    }
}

impl fmt::Display for QueryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryStrategy::EagerToOneOnly => "EAGER_TOONE_ONLY",
            QueryStrategy::EagerToOnePlusBatchCollection => "EAGER_TOONE_PLUS_BATCH_COLLECTION",
            QueryStrategy::FlatSingleQuery => "FLAT_SINGLE_QUERY",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestShape {
    pub needs_collection: bool,
    pub window: Option<PageWindow>,
}

impl RequestShape {
    pub fn headers(window: Option<PageWindow>) -> Self {
        Self {
            needs_collection: false,
            window,
        }
    }

    pub fn aggregates(window: Option<PageWindow>) -> Self {
        Self {
            needs_collection: true,
            window,
        }
    }

    pub fn strategy(&self) -> QueryStrategy {
        QueryStrategy::select(self.needs_collection, self.window.is_some())
    }
}
