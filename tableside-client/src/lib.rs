//! Tableside Client - ordering API client for restaurant tables, kitchens and admins
//!
//! Provides the REST gateway, token storage, the customer cart and the live
//! STOMP order feeds behind the kitchen board and the customer tracker.

pub mod admin;
pub mod api;
pub mod auth;
pub mod cart;
pub mod config;
pub mod customer;
pub mod error;
pub mod http;
pub mod kitchen;
pub mod live;
pub mod logger;
pub mod notify;
pub mod storage;
pub mod time_ago;

pub use auth::AuthSession;
pub use cart::{Cart, CartLine};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{ApiClient, HttpClient};
pub use kitchen::{KitchenBoard, KitchenHub};
pub use live::{FeedEvent, LiveFeed};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenSlot, TokenStore};

// Re-export shared types for convenience
pub use shared::models::{MenuItem, Order, OrderStatus};
