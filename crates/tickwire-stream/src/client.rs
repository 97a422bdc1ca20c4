//! The streaming connection manager.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt};
use parking_lot::{Mutex, RwLock};
use tickwire_aggregate::{AggregatorSet, Candle};
use tickwire_types::{Endpoint, Symbol, Tick, Timeframe};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::config::StreamConfig;
use crate::decode::{Frame, decode_frame};
use crate::error::StreamError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An event produced by a running [`StreamClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A market data tick, after decoding.
    Tick(Tick),
    /// A candle closed by the aggregation pipeline.
    Candle {
        /// Timeframe the candle was aggregated on.
        timeframe: Timeframe,
        /// The closed candle.
        candle: Candle,
    },
    /// A service acknowledgement from the feed.
    Status {
        /// HTTP-style status code.
        code: u16,
        /// Optional human-readable message.
        message: Option<String>,
    },
}

/// State shared between the worker task and the client handle.
#[derive(Debug)]
struct SharedState {
    running: AtomicBool,
    messages: AtomicU64,
    last_error: Mutex<Option<String>>,
}

impl SharedState {
    fn record_error(&self, error: &impl std::fmt::Display) {
        *self.last_error.lock() = Some(error.to_string());
    }
}

/// Per-message processing, separated from the socket loop so it can be
/// exercised without a connection.
#[derive(Debug)]
struct StreamWorker {
    store_ticks: bool,
    log_ticks: bool,
    aggregators: AggregatorSet,
    buffer: Arc<RwLock<Vec<Tick>>>,
    state: Arc<SharedState>,
    events: mpsc::UnboundedSender<StreamEvent>,
}

impl StreamWorker {
    /// Processes one inbound text payload.
    ///
    /// Every payload counts as a received message, including ones that
    /// fail to decode. Send failures mean the receiver was dropped and
    /// are ignored; the socket loop keeps draining either way.
    fn handle_frame(&mut self, payload: &str) {
        self.state.messages.fetch_add(1, Ordering::Relaxed);
        let Some(frame) = decode_frame(payload) else {
            return;
        };
        match frame {
            Frame::Status(status) => {
                info!(code = status.code, message = ?status.message, "feed status");
                let _ = self.events.send(StreamEvent::Status {
                    code: status.code,
                    message: status.message,
                });
            }
            Frame::Tick(tick) => {
                if tick.is_empty() {
                    return;
                }
                if self.log_ticks {
                    info!(?tick, "tick");
                }
                for (timeframe, candle) in self.aggregators.process(&tick) {
                    info!(timeframe = %timeframe.as_str(), %candle, "candle closed");
                    let _ = self.events.send(StreamEvent::Candle { timeframe, candle });
                }
                if self.store_ticks {
                    self.buffer.write().push(tick.clone());
                }
                let _ = self.events.send(StreamEvent::Tick(tick));
            }
        }
    }

    /// Emits the still-open candle of every timeframe, if any.
    fn flush(self) {
        for (timeframe, candle) in self.aggregators.finish() {
            info!(timeframe = %timeframe.as_str(), %candle, "candle flushed");
            let _ = self.events.send(StreamEvent::Candle { timeframe, candle });
        }
    }

    async fn run(
        mut self,
        mut ws: WsStream,
        mut stop: watch::Receiver<bool>,
        ping_interval: Duration,
        throttle: Option<Duration>,
    ) {
        let mut ping = tokio::time::interval(ping_interval);
        ping.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick fires immediately; a ping straight
        // after the subscribe frame is pointless.
        ping.tick().await;

        'recv: loop {
            tokio::select! {
                changed = stop.changed() => {
                    // A dropped sender stops the stream like an
                    // explicit stop request does.
                    if changed.is_err() || *stop.borrow() {
                        debug!("stop requested");
                        break;
                    }
                }
                _ = ping.tick() => {
                    if let Err(error) = ws.send(Message::Ping(Bytes::from_static(b"keepalive"))).await {
                        warn!(%error, "keepalive ping failed");
                        self.state.record_error(&error);
                        break;
                    }
                }
                message = ws.next() => match message {
                    Some(Ok(Message::Text(text))) => {
                        self.handle_frame(text.as_str());
                        // The pause must not delay stop observation.
                        if let Some(pause) = throttle {
                            tokio::select! {
                                () = tokio::time::sleep(pause) => {}
                                changed = stop.changed() => {
                                    if changed.is_err() || *stop.borrow() {
                                        debug!("stop requested");
                                        break 'recv;
                                    }
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!(?frame, "feed closed the connection");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        warn!(%error, "receive failed");
                        self.state.record_error(&error);
                        break;
                    }
                    None => {
                        info!("feed stream ended");
                        break;
                    }
                }
            }
        }

        if let Err(error) = ws.close(None).await {
            debug!(%error, "close handshake failed");
        }
        self.state.running.store(false, Ordering::Release);
        self.flush();
    }
}

/// Handle to a live feed connection.
///
/// [`StreamClient::connect`] establishes the WebSocket, sends the
/// subscribe frame and spawns a background task that drives the
/// socket. Decoded ticks, closed candles and feed status messages
/// arrive on the returned channel; the handle itself exposes
/// bookkeeping and the [`stop`](StreamClient::stop) switch.
#[derive(Debug)]
pub struct StreamClient {
    stop: watch::Sender<bool>,
    worker: JoinHandle<()>,
    state: Arc<SharedState>,
    buffer: Arc<RwLock<Vec<Tick>>>,
    started_at: DateTime<Utc>,
    endpoint: Endpoint,
    symbols: Vec<Symbol>,
}

impl StreamClient {
    /// Connects, subscribes and starts the background receive task.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Connect`] when the WebSocket handshake
    /// fails and [`StreamError::Subscribe`] when the subscribe frame
    /// cannot be sent.
    pub async fn connect(
        config: StreamConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<StreamEvent>), StreamError> {
        let url = config.feed_url();
        let endpoint = config.subscription.endpoint();
        info!(
            %endpoint,
            symbols = %config.subscription.symbols_csv(),
            "connecting to feed"
        );

        let (mut ws, _) = connect_async(&url).await.map_err(StreamError::Connect)?;
        ws.send(Message::text(config.subscription.subscribe_frame()))
            .await
            .map_err(StreamError::Subscribe)?;
        info!(symbol_count = config.subscription.symbols().len(), "subscribed");

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);
        let state = Arc::new(SharedState {
            running: AtomicBool::new(true),
            messages: AtomicU64::new(0),
            last_error: Mutex::new(None),
        });
        let buffer = Arc::new(RwLock::new(Vec::new()));

        let worker = StreamWorker {
            store_ticks: config.store_ticks,
            log_ticks: config.log_ticks,
            aggregators: AggregatorSet::new(config.timeframes.iter().copied()),
            buffer: Arc::clone(&buffer),
            state: Arc::clone(&state),
            events: events_tx,
        };
        let task = tokio::spawn(worker.run(ws, stop_rx, config.ping_interval, config.throttle));

        let client = Self {
            stop: stop_tx,
            worker: task,
            state,
            buffer,
            started_at: Utc::now(),
            endpoint,
            symbols: config.subscription.symbols().to_vec(),
        };
        Ok((client, events_rx))
    }

    /// Stops the stream and waits for the background task to finish.
    ///
    /// Open candles are flushed to the event channel before the task
    /// exits. Consuming `self` makes a second stop unrepresentable.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(error) = self.worker.await {
            warn!(%error, "worker task failed");
        }
    }

    /// Whether the background task is still receiving.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::Acquire)
    }

    /// Number of messages received so far, decodable or not.
    #[must_use]
    pub fn message_count(&self) -> u64 {
        self.state.messages.load(Ordering::Relaxed)
    }

    /// The most recent socket error, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state.last_error.lock().clone()
    }

    /// Snapshot of the buffered ticks. Empty unless the stream was
    /// configured with `store_ticks`.
    #[must_use]
    pub fn raw_ticks(&self) -> Vec<Tick> {
        self.buffer.read().clone()
    }

    /// When the connection was established.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time elapsed since the connection was established.
    #[must_use]
    pub fn uptime(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }

    /// The endpoint this stream is connected to.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// The symbols this stream subscribed to.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}
