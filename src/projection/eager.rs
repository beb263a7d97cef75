use std::collections::HashSet;

use crate::domain::errors::DomainError;
use crate::domain::order::OrderHeader;
use crate::domain::page::PageWindow;
use crate::domain::ports::RowSource;

/// Loads headers with member, delivery and address joined in one round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct EagerJoinLoader;

impl EagerJoinLoader {
    /// One query. The window, if any, is applied to the header query itself,
    /// which is sound because no collection is joined.
    pub fn load(
        &self,
        source: &mut dyn RowSource,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderHeader>, DomainError> {
        let headers = source.order_headers(window)?;

        // A repeated id here means a join multiplied rows.
        let mut seen = HashSet::with_capacity(headers.len());
        if let Some(dup) = headers.iter().find(|h| !seen.insert(h.id)) {
            return Err(DomainError::DataIntegrity(format!(
                "order {} returned more than once by the to-one join",
                dup.id
            )));
        }

        log::debug!("eager join loaded {} order headers", headers.len());
        Ok(headers)
    }
}
