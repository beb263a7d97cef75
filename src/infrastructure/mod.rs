#[cfg(test)]
pub(crate) mod memory_store;
pub mod models;
pub mod order_store;
