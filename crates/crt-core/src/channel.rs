//! WebSocket session with the game server.
//!
//! The socket lives on a dedicated worker thread running a non-blocking
//! read/write loop. Decoded messages flow to the console through an
//! unbounded channel, in the order the server sent them; outbound messages
//! are queued without blocking the caller.

use std::io;
use std::net::TcpStream;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crt_protocol::{ClientMessage, ServerMessage, decode_server_message};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Error as WsError, Message, WebSocket};
use url::Url;

/// How long the worker sleeps when a pass made no progress.
const IDLE_SLEEP: Duration = Duration::from_millis(10);

/// Upper bound on waiting for the peer to finish a close handshake.
const CLOSE_GRACE: Duration = Duration::from_millis(500);

type Socket = WebSocket<MaybeTlsStream<TcpStream>>;

/// Lifecycle and traffic reported by a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Connected,
    Message(ServerMessage),
    /// Always the last event. `reason` is `None` for a clean close.
    Disconnected { reason: Option<String> },
}

pub type ChannelEventSender = mpsc::UnboundedSender<ChannelEvent>;

/// Entry point for opening sessions.
pub struct SessionChannel;

impl SessionChannel {
    /// Opens a session to `url` on a worker thread.
    ///
    /// Connection failures are reported as `ChannelEvent::Disconnected`,
    /// never as an error here.
    ///
    /// # Errors
    /// Returns an error only if the worker thread cannot be spawned.
    pub fn spawn(url: &Url, events: ChannelEventSender) -> Result<SessionHandle> {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let worker = Worker {
            url: url.clone(),
            outbound: outbound_rx,
            events,
            cancel: cancel.clone(),
        };
        thread::Builder::new()
            .name("crt-session".to_string())
            .spawn(move || worker.run())
            .context("Failed to spawn session thread")?;

        Ok(SessionHandle {
            outbound: outbound_tx,
            cancel,
        })
    }
}

/// Handle to a running session. Dropping it disconnects.
#[derive(Debug)]
pub struct SessionHandle {
    outbound: mpsc::UnboundedSender<ClientMessage>,
    cancel: CancellationToken,
}

impl SessionHandle {
    /// Queues a message for the server without waiting for delivery.
    pub fn send(&self, message: ClientMessage) {
        if self.outbound.send(message).is_err() {
            tracing::warn!("Session closed; outbound message dropped");
        }
    }

    /// Sends `disconnect`, closes the socket and stops event delivery.
    pub fn disconnect(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled() || self.outbound.is_closed()
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Worker {
    url: Url,
    outbound: mpsc::UnboundedReceiver<ClientMessage>,
    events: ChannelEventSender,
    cancel: CancellationToken,
}

/// Why the session loop ended.
enum Exit {
    /// Local disconnect or the server closed cleanly.
    Closed,
    /// Nobody is listening for events anymore.
    Abandoned,
    Failed(String),
}

impl Worker {
    fn run(mut self) {
        tracing::info!(url = %self.url, "Connecting to game server");

        let mut socket = match connect(&self.url) {
            Ok(socket) => socket,
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(%reason, "Connection failed");
                self.emit(ChannelEvent::Disconnected {
                    reason: Some(reason),
                });
                return;
            }
        };

        if self.cancel.is_cancelled() {
            let _ = socket.close(None);
            return;
        }

        tracing::info!("Connected to game server");
        if !self.emit(ChannelEvent::Connected) {
            let _ = socket.close(None);
            return;
        }

        match self.pump(&mut socket) {
            Exit::Closed => {
                tracing::info!("Session closed");
                self.emit(ChannelEvent::Disconnected { reason: None });
            }
            Exit::Abandoned => {
                tracing::debug!("Event receiver dropped; closing session");
                self.say_goodbye(&mut socket);
            }
            Exit::Failed(reason) => {
                tracing::warn!(%reason, "Session lost");
                self.emit(ChannelEvent::Disconnected {
                    reason: Some(reason),
                });
            }
        }
    }

    fn pump(&mut self, socket: &mut Socket) -> Exit {
        loop {
            if self.cancel.is_cancelled() {
                self.say_goodbye(socket);
                return Exit::Closed;
            }

            let mut progressed = false;

            while let Ok(message) = self.outbound.try_recv() {
                progressed = true;
                if let Err(reason) = send_message(socket, &message) {
                    return Exit::Failed(reason);
                }
            }

            loop {
                match socket.read() {
                    Ok(Message::Text(text)) => {
                        progressed = true;
                        match decode_server_message(text.as_str()) {
                            Ok(inbound) => {
                                if !self.emit(ChannelEvent::Message(inbound.message)) {
                                    return Exit::Abandoned;
                                }
                            }
                            Err(err) => {
                                tracing::warn!(error = %format!("{err:#}"), "Dropping undecodable frame");
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        finish_close(socket);
                        return Exit::Closed;
                    }
                    Ok(_) => progressed = true,
                    Err(WsError::Io(err)) if err.kind() == io::ErrorKind::WouldBlock => break,
                    Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return Exit::Closed,
                    Err(err) => return Exit::Failed(format!("Connection lost: {err}")),
                }
            }

            match socket.flush() {
                Ok(()) => {}
                Err(WsError::Io(err)) if err.kind() == io::ErrorKind::WouldBlock => {}
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return Exit::Closed,
                Err(err) => return Exit::Failed(format!("Connection lost: {err}")),
            }

            if !progressed {
                thread::sleep(IDLE_SLEEP);
            }
        }
    }

    /// Flushes queued messages, announces the disconnect and closes.
    fn say_goodbye(&mut self, socket: &mut Socket) {
        while let Ok(message) = self.outbound.try_recv() {
            if send_message(socket, &message).is_err() {
                return;
            }
        }
        let _ = send_message(socket, &ClientMessage::Disconnect {});
        let _ = socket.close(None);
        finish_close(socket);
    }

    /// Delivers an event. Returns `false` once the receiver is gone.
    fn emit(&self, event: ChannelEvent) -> bool {
        self.events.send(event).is_ok()
    }
}

/// Drives the socket until the close handshake completes, so a queued
/// close frame actually reaches the peer. Gives up after `CLOSE_GRACE`.
fn finish_close(socket: &mut Socket) {
    let deadline = Instant::now() + CLOSE_GRACE;
    while Instant::now() < deadline {
        let result = match socket.flush() {
            Ok(()) => socket.read().map(|_| ()),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {}
            Err(WsError::Io(err)) if err.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(IDLE_SLEEP);
            }
            Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return,
            Err(err) => {
                tracing::debug!(error = %err, "Close handshake interrupted");
                return;
            }
        }
    }
    tracing::debug!("Close handshake timed out");
}

fn connect(url: &Url) -> Result<Socket> {
    let (socket, _response) = tungstenite::connect(url.as_str())
        .with_context(|| format!("Failed to connect to {url}"))?;

    match socket.get_ref() {
        MaybeTlsStream::Plain(stream) => {
            stream.set_nodelay(true).context("Failed to configure socket")?;
            stream
                .set_nonblocking(true)
                .context("Failed to configure socket")?;
        }
        _ => anyhow::bail!("Unsupported stream for {url}"),
    }

    Ok(socket)
}

/// Writes one message. A `WouldBlock` leaves the frame buffered for the
/// next flush.
fn send_message(socket: &mut Socket, message: &ClientMessage) -> Result<(), String> {
    let text = message.encode().map_err(|err| format!("{err:#}"))?;
    tracing::debug!(?message, "Sending message");
    match socket.send(Message::text(text)) {
        Ok(()) => Ok(()),
        Err(WsError::Io(err)) if err.kind() == io::ErrorKind::WouldBlock => Ok(()),
        Err(err) => Err(format!("Send failed: {err}")),
    }
}
