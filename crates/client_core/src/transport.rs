//! Named-message channel between a scoring panel and the arena server.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use shared::{
    domain::StationIdentity,
    protocol::{ClientCommand, ServerEvent},
};
use tokio::{net::TcpStream, sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    error::TransportError,
    session::{SessionEvent, TransportStatus},
};

pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Outbound half of the panel channel. Sends are fire-and-forget.
pub trait Transport {
    fn send(&mut self, command: &ClientCommand) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, command: &ClientCommand) -> Result<(), TransportError> {
        (**self).send(command)
    }
}

/// Builds the per-station websocket endpoint from the arena base url.
pub fn station_websocket_url(
    server_url: &str,
    station: &StationIdentity,
) -> Result<Url, TransportError> {
    let server_url = server_url.trim_end_matches('/');
    let ws_url = if server_url.starts_with("https://") {
        server_url.replacen("https://", "wss://", 1)
    } else if server_url.starts_with("http://") {
        server_url.replacen("http://", "ws://", 1)
    } else if server_url.starts_with("ws://") || server_url.starts_with("wss://") {
        server_url.to_string()
    } else {
        return Err(TransportError::UnsupportedScheme(server_url.to_string()));
    };
    let ws_url = format!("{ws_url}/panels/scoring/{}/websocket", station.position());
    Ok(Url::parse(&ws_url)?)
}

#[derive(Debug, Clone)]
pub struct WebSocketConfig {
    pub url: Url,
    pub reconnect_delay: Duration,
}

impl WebSocketConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }

    #[must_use]
    pub fn with_reconnect_delay(mut self, reconnect_delay: Duration) -> Self {
        self.reconnect_delay = reconnect_delay;
        self
    }
}

/// Websocket-backed [`Transport`].
///
/// A background task owns the socket. Decoded inbound events are pushed onto
/// the session queue in arrival order; outbound frames are queued on an
/// unbounded channel and written by the same task. When the socket drops the
/// task reports [`TransportStatus::Disconnected`], waits `reconnect_delay`
/// and dials again. Frames queued while disconnected are discarded.
pub struct WebSocketTransport {
    outbound: mpsc::UnboundedSender<String>,
}

impl WebSocketTransport {
    /// Starts the connection task. Dropping the returned transport closes the
    /// socket and ends the task.
    pub fn spawn(
        config: WebSocketConfig,
        events: mpsc::Sender<SessionEvent>,
    ) -> (Self, JoinHandle<()>) {
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(connection_loop(config, outbound_rx, events));
        (Self { outbound }, task)
    }
}

impl Transport for WebSocketTransport {
    fn send(&mut self, command: &ClientCommand) -> Result<(), TransportError> {
        let text = command.encode()?;
        self.outbound.send(text).map_err(|_| TransportError::Closed)
    }
}

/// Waits for the connection task to write out queued frames and close the
/// socket. Call after the transport itself has been dropped. Returns `false`
/// if the task had to be aborted after `grace`.
pub async fn finish_transport(task: JoinHandle<()>, grace: Duration) -> bool {
    let abort = task.abort_handle();
    match tokio::time::timeout(grace, task).await {
        Ok(_) => true,
        Err(_) => {
            warn!(?grace, "transport: queued frames not flushed in time, aborting");
            abort.abort();
            false
        }
    }
}

type PanelSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

enum SocketEnd {
    Lost,
    Shutdown,
}

async fn connection_loop(
    config: WebSocketConfig,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    events: mpsc::Sender<SessionEvent>,
) {
    loop {
        match connect_async(config.url.as_str()).await {
            Ok((stream, _)) => {
                info!(url = %config.url, "transport: connected");
                if events
                    .send(SessionEvent::Transport(TransportStatus::Connected))
                    .await
                    .is_err()
                {
                    return;
                }
                if let SocketEnd::Shutdown = pump(stream, &mut outbound_rx, &events).await {
                    return;
                }
            }
            Err(err) => {
                let err = TransportError::Connect {
                    url: config.url.to_string(),
                    source: err,
                };
                warn!("transport: {err}");
            }
        }

        if events
            .send(SessionEvent::Transport(TransportStatus::Disconnected))
            .await
            .is_err()
        {
            return;
        }

        let retry_at = tokio::time::sleep(config.reconnect_delay);
        tokio::pin!(retry_at);
        loop {
            tokio::select! {
                _ = &mut retry_at => break,
                outbound = outbound_rx.recv() => match outbound {
                    Some(text) => warn!(frame = %text, "transport: dropped frame while disconnected"),
                    None => return,
                },
            }
        }
        debug!(url = %config.url, "transport: reconnecting");
    }
}

async fn pump(
    stream: PanelSocket,
    outbound_rx: &mut mpsc::UnboundedReceiver<String>,
    events: &mpsc::Sender<SessionEvent>,
) -> SocketEnd {
    let (mut writer, mut reader) = stream.split();
    loop {
        tokio::select! {
            frame = reader.next() => match frame {
                Some(Ok(Message::Text(text))) => match ServerEvent::decode(&text) {
                    Ok(Some(event)) => {
                        if events.send(SessionEvent::Server(event)).await.is_err() {
                            let _ = writer.close().await;
                            return SocketEnd::Shutdown;
                        }
                    }
                    Ok(None) => debug!(frame = %text, "transport: ignoring unhandled message"),
                    Err(err) => warn!("transport: invalid server message: {err}"),
                },
                Some(Ok(Message::Close(_))) | None => {
                    info!("transport: server closed connection");
                    return SocketEnd::Lost;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!("transport: websocket receive failed: {err}");
                    return SocketEnd::Lost;
                }
            },
            outbound = outbound_rx.recv() => match outbound {
                Some(text) => {
                    if let Err(err) = writer.send(Message::Text(text)).await {
                        warn!("transport: websocket send failed: {err}");
                        return SocketEnd::Lost;
                    }
                }
                None => {
                    let _ = writer.close().await;
                    return SocketEnd::Shutdown;
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
