//! Task board: tasks, tags and the drag-and-drop reordering engine.
//!
//! Follows the hexagonal layout used across the crate:
//!
//! - Domain types and the placement engine in [`domain`]
//! - Persistence contracts in [`ports`]
//! - In-memory and `PostgreSQL` stores in [`adapters`]
//! - Ownership-checked operations in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
