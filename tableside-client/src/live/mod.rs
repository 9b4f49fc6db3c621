//! Live push feed
//!
//! One STOMP-over-WebSocket subscription per view. Each message carries a
//! full JSON snapshot of a record; consumers replace their copy keyed by id.
//! Reconnects use a fixed delay and re-fetch the snapshot every time.

mod feed;
pub mod stomp;

pub use feed::{FeedEvent, FeedOptions, LiveFeed, SnapshotSource};
pub use stomp::Frame;
