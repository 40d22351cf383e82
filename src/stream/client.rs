//! WebSocket client for trade-price streams
//!
//! Maintains one persistent connection per subscription key, decodes trade
//! frames into prices, and recovers from connection loss with a fixed-delay
//! reconnect that only an explicit disconnect stops.

use crate::config::StreamConfig;
use crate::stream::types::decode_trade_price;
use futures_util::{SinkExt, StreamExt};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Capacity of the broadcast channel carrying decoded prices
const PRICE_CHANNEL_CAPACITY: usize = 256;

/// Connection state of the stream client
///
/// Exactly one state is active at a time:
/// - `Disconnected → Connected` on `connect`
/// - `Connected → Reconnecting` on a receive failure
/// - `Reconnecting → Connected` once a fresh connection opens
/// - any → `Disconnected` on explicit `disconnect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Disconnected = 0,
    Connected = 1,
    Reconnecting = 2,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connected,
            2 => ConnectionState::Reconnecting,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// Shared connection state cell
///
/// The receive loop updates state with compare-and-swap so a concurrent
/// `disconnect` (which stores `Disconnected` directly) always wins: once the
/// expected prior state is gone, the loop's transition is a no-op.
#[derive(Clone)]
struct StateCell(Arc<AtomicU8>);

impl StateCell {
    fn new() -> Self {
        StateCell(Arc::new(AtomicU8::new(ConnectionState::Disconnected as u8)))
    }

    fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.load(Ordering::SeqCst))
    }

    fn set(&self, state: ConnectionState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }

    fn transition(&self, from: ConnectionState, to: ConnectionState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// Handle to the spawned receive loop for the current subscription
struct ActiveStream {
    key: String,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Client for a single trade-price WebSocket stream
///
/// Owns one connection per active subscription key. Decoded prices are pushed
/// into a broadcast channel obtained via [`subscribe`](Self::subscribe); the
/// sequence survives reconnects and ends only when the client is dropped.
///
/// ## Example
/// ```rust,no_run
/// use market_feeds::config::StreamConfig;
/// use market_feeds::stream::StreamClient;
///
/// # async fn example() {
/// let client = StreamClient::new(StreamConfig::default());
/// let mut prices = client.subscribe();
///
/// client.connect("btcusdt").await;
/// while let Ok(price) = prices.recv().await {
///     println!("trade @ {}", price);
/// }
/// # }
/// ```
pub struct StreamClient {
    config: StreamConfig,
    price_tx: broadcast::Sender<Decimal>,
    state: StateCell,
    active: Mutex<Option<ActiveStream>>,
}

impl StreamClient {
    /// Create a new stream client; no connection is opened until
    /// [`connect`](Self::connect) is called.
    pub fn new(config: StreamConfig) -> Self {
        let (price_tx, _) = broadcast::channel(PRICE_CHANNEL_CAPACITY);

        Self {
            config,
            price_tx,
            state: StateCell::new(),
            active: Mutex::new(None),
        }
    }

    /// Subscribe to the decoded price sequence.
    ///
    /// One value is emitted per successfully decoded trade frame. Receivers
    /// are read-only views; they give no control over the connection.
    pub fn subscribe(&self) -> broadcast::Receiver<Decimal> {
        self.price_tx.subscribe()
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Liveness flag: `true` only while the connection is believed open.
    pub fn is_connected(&self) -> bool {
        self.state.get() == ConnectionState::Connected
    }

    /// Open (or reopen) the stream for a subscription key (e.g. "btcusdt").
    ///
    /// Tears down any existing connection first, then spawns the receive
    /// loop and optimistically reports `Connected`; actual liveness is
    /// confirmed by frame receipt. A key that cannot form a valid endpoint
    /// is ignored with a warning and no connection attempt.
    pub async fn connect(&self, key: &str) {
        let mut active = self.active.lock().await;
        Self::teardown(&mut active, &self.state);

        let url = match self.config.trade_stream_url(key) {
            Some(url) => url,
            None => {
                warn!(key = %key, "Invalid subscription key, not connecting");
                return;
            }
        };

        let key = key.to_lowercase();
        self.state.set(ConnectionState::Connected);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_stream(
            url,
            key.clone(),
            self.price_tx.clone(),
            self.state.clone(),
            cancel.clone(),
            self.config.reconnect_delay,
        ));

        *active = Some(ActiveStream {
            key,
            cancel,
            handle,
        });
    }

    /// Close the active connection, if any, and suppress reconnection.
    ///
    /// Effective even while a reconnect delay is pending. Safe to call when
    /// already disconnected.
    pub async fn disconnect(&self) {
        let mut active = self.active.lock().await;
        Self::teardown(&mut active, &self.state);
    }

    /// Cancel and abort the receive loop, leaving the client `Disconnected`.
    ///
    /// Called with the `active` lock held, which is what keeps `connect`,
    /// `disconnect`, and loop teardown from interleaving.
    fn teardown(active: &mut Option<ActiveStream>, state: &StateCell) {
        if let Some(stream) = active.take() {
            stream.cancel.cancel();
            stream.handle.abort();
            info!(key = %stream.key, "Trade stream disconnected");
        }
        state.set(ConnectionState::Disconnected);
    }
}

impl Drop for StreamClient {
    fn drop(&mut self) {
        // The receive loop holds no self-reference; cancelling here stops it
        // even if the caller never called disconnect.
        if let Some(stream) = self.active.get_mut().take() {
            stream.cancel.cancel();
            stream.handle.abort();
        }
    }
}

/// Receive loop for one subscription.
///
/// Runs until cancelled: connects, reads frames, and on any failure waits out
/// the fixed reconnect delay before opening a fresh connection. The
/// cancellation token is checked at every await point so `disconnect` cannot
/// be outlived by a pending reconnect timer.
async fn run_stream(
    url: String,
    key: String,
    price_tx: broadcast::Sender<Decimal>,
    state: StateCell,
    cancel: CancellationToken,
    reconnect_delay: Duration,
) {
    loop {
        let connected = tokio::select! {
            _ = cancel.cancelled() => return,
            result = connect_async(&url) => result,
        };

        match connected {
            Ok((ws_stream, _)) => {
                info!(key = %key, "Trade stream connected");
                state.transition(ConnectionState::Reconnecting, ConnectionState::Connected);

                let (mut write, mut read) = ws_stream.split();

                loop {
                    let msg = tokio::select! {
                        _ = cancel.cancelled() => return,
                        msg = read.next() => msg,
                    };

                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            match decode_trade_price(&text) {
                                Some(price) => {
                                    // Ignore send errors (no active receivers)
                                    let _ = price_tx.send(price);
                                }
                                None => {
                                    warn!(key = %key, "Dropping frame without a parseable price");
                                }
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            debug!(key = %key, "Received ping, sending pong");
                            if write.send(Message::Pong(data)).await.is_err() {
                                warn!(key = %key, "Failed to send pong");
                                break;
                            }
                        }
                        Some(Ok(Message::Pong(_))) => {
                            debug!(key = %key, "Received pong");
                        }
                        Some(Ok(Message::Close(frame))) => {
                            info!(key = %key, frame = ?frame, "WebSocket closed by server");
                            break;
                        }
                        Some(Ok(_)) => {
                            debug!(key = %key, "Ignoring non-text message");
                        }
                        Some(Err(e)) => {
                            warn!(key = %key, error = %e, "WebSocket read error");
                            break;
                        }
                        None => {
                            warn!(key = %key, "WebSocket stream ended");
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to connect to trade stream");
            }
        }

        if cancel.is_cancelled() {
            return;
        }

        // First failure flips the liveness flag; later failures find the
        // state already Reconnecting and leave it alone.
        state.transition(ConnectionState::Connected, ConnectionState::Reconnecting);

        debug!(
            key = %key,
            delay_ms = reconnect_delay.as_millis() as u64,
            "Reconnecting after delay"
        );

        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = sleep(reconnect_delay) => {}
        }
    }
}
