// Library exports for market-feeds

pub mod config; // Configuration management
pub mod error;

pub mod fetch; // Bounded-retry HTTP executor
pub mod news; // News fetch orchestration
pub mod stream; // Trade-price WebSocket streaming

pub use error::{FeedError, Result};
