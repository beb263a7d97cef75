use thiserror::Error;

use super::order::OrderId;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid page: {0}")]
    InvalidPage(String),
    #[error("Pagination is not supported by the flat projection")]
    UnsupportedPagination,
    #[error("Batch of {requested} ids exceeds the configured cap of {cap}")]
    BatchTooLarge { requested: usize, cap: usize },
    #[error("Illegal cancel: {0}")]
    IllegalCancel(String),
    #[error("Order {0} not found")]
    NotFound(OrderId),
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
