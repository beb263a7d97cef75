use super::errors::DomainError;

/// Largest page a single request may ask for.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// A validated `offset`/`limit` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: i64,
    limit: i64,
}

impl PageWindow {
    pub fn new(offset: i64, limit: i64) -> Result<Self, DomainError> {
        if offset < 0 {
            return Err(DomainError::InvalidPage(format!(
                "offset must not be negative, got {offset}"
            )));
        }
        if limit <= 0 {
            return Err(DomainError::InvalidPage(format!(
                "limit must be positive, got {limit}"
            )));
        }
        if limit > MAX_PAGE_SIZE {
            return Err(DomainError::InvalidPage(format!(
                "limit must not exceed {MAX_PAGE_SIZE}, got {limit}"
            )));
        }
        Ok(Self { offset, limit })
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }
}
