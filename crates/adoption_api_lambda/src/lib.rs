//! AWS-oriented adapters and handlers for the adoption API.
//!
//! This crate owns runtime integration details (Lambda bootstrap, DynamoDB
//! access, process configuration) and wires them to the validation, store
//! and response primitives in `adoption_api_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod runtime;
