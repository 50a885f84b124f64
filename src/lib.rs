pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;
pub mod visualization;

pub use crate::core::errors::FimdefestaError;
pub use crate::core::services::FimdefestaService;
pub use crate::core::summary::{BillSummary, compute_summary};
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;
pub use crate::visualization::Visualization;

#[cfg(test)]
mod tests;
