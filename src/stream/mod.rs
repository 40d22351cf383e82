//! Trade-price streaming
//!
//! Connects to a `<key>@trade` WebSocket stream for real-time trade prices.
//! Handles automatic reconnection with a fixed delay and broadcasts decoded
//! prices to subscribers.

pub mod client;
pub mod types;

// Re-export
pub use client::{ConnectionState, StreamClient};
pub use types::TradeEvent;
