//! Shared types for the Tableside ordering client
//!
//! Wire models mirrored from the ordering backend, the validation rules the
//! client enforces before submitting forms, push topic names and the error
//! body format returned by the API.

pub mod client;
pub mod error;
pub mod models;
pub mod topic;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorBody, ValidationError};
pub use models::{MenuItem, Order, OrderStatus};
