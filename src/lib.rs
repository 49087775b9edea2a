//! Taskboard: a Kanban task board backend.
//!
//! Tasks live in three status columns and carry an explicit order within
//! their column. Cards are moved by drag-and-drop; the server keeps the
//! column order consistent and the client applies moves optimistically.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: tasks, tags and the placement rules for drops
//! - **Ports**: repository traits for tasks and tags
//! - **Adapters**: in-memory and `PostgreSQL` stores
//!
//! # Modules
//!
//! - [`board`]: board domain, repositories and services
//! - [`rpc`]: procedure names, payloads, errors and the HTTP binding
//! - [`client`]: optimistic drag-and-drop controller for the board view
//! - [`config`]: layered runtime settings
//! - [`telemetry`]: tracing subscriber setup
//! - [`server`]: process wiring for the binary

pub mod board;
pub mod client;
pub mod config;
pub mod rpc;
pub mod server;
pub mod telemetry;
