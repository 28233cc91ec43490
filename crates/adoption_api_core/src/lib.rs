//! Shared adoption API domain primitives.
//!
//! This crate owns request validation, record stamping, the store contract
//! with its pagination loop, and response envelopes. It intentionally
//! excludes AWS SDK and Lambda runtime concerns.

pub mod error;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;
pub mod record;
pub mod response;
pub mod stamp;
pub mod store;
pub mod validation;
