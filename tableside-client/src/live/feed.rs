//! LiveFeed: background subscription worker
//!
//! 1. Connect WebSocket to the broker, send STOMP CONNECT, wait for CONNECTED
//! 2. SUBSCRIBE to the view's topic
//! 3. Fetch the snapshot over REST (after subscribing, so nothing published
//!    during the fetch is lost)
//! 4. Forward every MESSAGE body as JSON
//! 5. On disconnect wait `reconnect_delay` and start over
//! 6. Stop when the view cancels (explicit shutdown or handle dropped)

use async_trait::async_trait;
use futures::{SinkExt, Stream, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_util::sync::CancellationToken;

use super::stomp::Frame;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Buffered events between the worker and the view
const FEED_CHANNEL_CAPACITY: usize = 256;
/// Subscription id used for the single topic
const SUBSCRIPTION_ID: &str = "sub-0";

/// Source of the state a view starts from after each (re)connect
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    type Snapshot: Send + 'static;

    async fn fetch(&self) -> ClientResult<Self::Snapshot>;
}

/// Events delivered to the view
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent<S> {
    /// STOMP session established
    Connected,
    /// Fresh snapshot after (re)connecting
    Snapshot(S),
    /// Snapshot fetch failed; live messages still follow
    SnapshotFailed(String),
    /// One pushed record
    Message(serde_json::Value),
    /// Connection lost or never established; a retry follows
    Disconnected,
    /// Transport or broker error
    Error(String),
}

#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub url: String,
    pub topic: String,
    pub token: Option<String>,
    pub reconnect_delay: Duration,
}

impl FeedOptions {
    pub fn new(config: &ClientConfig, topic: impl Into<String>, token: Option<String>) -> Self {
        Self {
            url: config.ws_url.clone(),
            topic: topic.into(),
            token,
            reconnect_delay: config.reconnect_delay,
        }
    }

    /// Host part of the broker URL, sent in the CONNECT frame
    fn host(&self) -> &str {
        self.url
            .split("://")
            .nth(1)
            .and_then(|s| s.split('/').next())
            .map(|s| s.rsplit_once(':').map_or(s, |(host, _)| host))
            .filter(|s| !s.is_empty())
            .unwrap_or("localhost")
    }
}

/// Handle to a running subscription
///
/// Dropping the handle stops the worker.
#[derive(Debug)]
pub struct LiveFeed {
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl LiveFeed {
    /// Start the worker; events arrive on the returned receiver
    pub fn spawn<S: SnapshotSource>(
        options: FeedOptions,
        source: S,
    ) -> (Self, mpsc::Receiver<FeedEvent<S::Snapshot>>) {
        let (tx, rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let shutdown = CancellationToken::new();
        let worker = FeedWorker {
            options,
            source,
            tx,
            shutdown: shutdown.clone(),
        };
        let task = tokio::spawn(worker.run());
        (
            Self {
                shutdown,
                task: Some(task),
            },
            rx,
        )
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the worker and wait for it to finish
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::warn!("Live feed task ended abnormally: {e}");
        }
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

enum SessionEnd {
    /// Cancelled or nobody is listening any more
    Shutdown,
    /// Broker closed the connection
    Closed,
}

struct FeedWorker<S: SnapshotSource> {
    options: FeedOptions,
    source: S,
    tx: mpsc::Sender<FeedEvent<S::Snapshot>>,
    shutdown: CancellationToken,
}

impl<S: SnapshotSource> FeedWorker<S> {
    async fn run(self) {
        tracing::info!(topic = %self.options.topic, url = %self.options.url, "Live feed started");

        loop {
            if self.shutdown.is_cancelled() {
                break;
            }

            match self.run_session().await {
                Ok(SessionEnd::Shutdown) => break,
                Ok(SessionEnd::Closed) => {
                    tracing::info!(topic = %self.options.topic, "Broker closed the live feed");
                }
                Err(e) => {
                    tracing::warn!(
                        topic = %self.options.topic,
                        delay_ms = self.options.reconnect_delay.as_millis() as u64,
                        "Live feed error, reconnecting: {e}"
                    );
                    if !self.emit(FeedEvent::Error(e.to_string())).await {
                        break;
                    }
                }
            }

            if !self.emit(FeedEvent::Disconnected).await {
                break;
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.options.reconnect_delay) => {},
            }
        }

        tracing::info!(topic = %self.options.topic, "Live feed stopped");
    }

    /// Send an event; false once the view is gone
    async fn emit(&self, event: FeedEvent<S::Snapshot>) -> bool {
        tokio::select! {
            _ = self.shutdown.cancelled() => false,
            sent = self.tx.send(event) => sent.is_ok(),
        }
    }

    async fn run_session(&self) -> ClientResult<SessionEnd> {
        let (ws, _response) = tokio::select! {
            _ = self.shutdown.cancelled() => return Ok(SessionEnd::Shutdown),
            connected = tokio_tungstenite::connect_async(self.options.url.as_str()) => connected?,
        };
        let (mut sink, mut stream) = ws.split();

        let connect = Frame::connect(self.options.host(), self.options.token.as_deref());
        sink.send(Message::Text(connect.encode().into())).await?;

        // Wait for CONNECTED
        loop {
            let frame = tokio::select! {
                _ = self.shutdown.cancelled() => {
                    let _ = sink.close().await;
                    return Ok(SessionEnd::Shutdown);
                }
                frame = next_frame(&mut stream) => frame?,
            };
            let Some(frame) = frame else {
                return Ok(SessionEnd::Closed);
            };
            match frame.command.as_str() {
                "CONNECTED" => break,
                "ERROR" => return Err(broker_error(&frame)),
                other => tracing::debug!(command = other, "Ignoring frame before CONNECTED"),
            }
        }

        tracing::info!(topic = %self.options.topic, "Live feed connected");
        if !self.emit(FeedEvent::Connected).await {
            return Ok(SessionEnd::Shutdown);
        }

        let subscribe = Frame::subscribe(SUBSCRIPTION_ID, &self.options.topic);
        sink.send(Message::Text(subscribe.encode().into())).await?;

        let snapshot = tokio::select! {
            _ = self.shutdown.cancelled() => return Ok(SessionEnd::Shutdown),
            snapshot = self.source.fetch() => snapshot,
        };
        let event = match snapshot {
            Ok(snapshot) => FeedEvent::Snapshot(snapshot),
            Err(e) => {
                tracing::error!(topic = %self.options.topic, "Failed to fetch snapshot: {e}");
                FeedEvent::SnapshotFailed(e.user_message())
            }
        };
        if !self.emit(event).await {
            return Ok(SessionEnd::Shutdown);
        }

        loop {
            let frame = tokio::select! {
                _ = self.shutdown.cancelled() => {
                    let _ = sink.send(Message::Text(Frame::disconnect().encode().into())).await;
                    let _ = sink.close().await;
                    return Ok(SessionEnd::Shutdown);
                }
                frame = next_frame(&mut stream) => frame?,
            };
            let Some(frame) = frame else {
                return Ok(SessionEnd::Closed);
            };
            match frame.command.as_str() {
                "MESSAGE" => {
                    if frame.body.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<serde_json::Value>(&frame.body) {
                        Ok(value) => {
                            if !self.emit(FeedEvent::Message(value)).await {
                                return Ok(SessionEnd::Shutdown);
                            }
                        }
                        Err(e) => tracing::warn!("Skipping non-JSON message body: {e}"),
                    }
                }
                "ERROR" => return Err(broker_error(&frame)),
                other => tracing::debug!(command = other, "Ignoring frame"),
            }
        }
    }
}

/// Next non-heart-beat frame, `None` when the connection closed
async fn next_frame<St>(stream: &mut St) -> ClientResult<Option<Frame>>
where
    St: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(message) = stream.next().await {
        let frame = match message? {
            Message::Text(text) => Frame::parse(text.as_str())?,
            Message::Binary(bytes) => Frame::parse(&String::from_utf8_lossy(&bytes))?,
            Message::Close(_) => return Ok(None),
            _ => continue,
        };
        if let Some(frame) = frame {
            return Ok(Some(frame));
        }
    }
    Ok(None)
}

fn broker_error(frame: &Frame) -> ClientError {
    let message = frame
        .get("message")
        .map(str::to_owned)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| frame.body.clone());
    ClientError::Live(format!("broker error: {message}"))
}
