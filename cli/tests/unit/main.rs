//! Unit tests for provctl
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod backend_gateway;
mod file_store;
mod store_queue;
