use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{oneshot, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::commands::CommandSpec;
use crate::errors::TnyError;
use crate::packets::{Request, Response};
use crate::wire::WireValue;

use super::TnyDriverConfig;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

/// Requests that were sent and still await their matching response frame,
/// keyed by request id. Dropping a sender rejects the waiting caller with
/// `ConnectionLost`.
type PendingMap = HashMap<u16, oneshot::Sender<Response>>;

/// Driver for the TNY360 motion controller.
///
/// Owns the single WebSocket session to the controller and correlates command
/// requests with their responses. The handle is cheap to clone; all clones
/// share one connection and one pending-request table. Construct one
/// explicitly with [`TnyDriver::connect`] and pass it to whoever needs it —
/// there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct TnyDriver {
    pub config: TnyDriverConfig,
    ws_write: Arc<Mutex<WsSink>>,
    pending: Arc<Mutex<PendingMap>>,
    next_request_id: Arc<Mutex<u16>>,
    connected: Arc<Mutex<bool>>,
}

impl TnyDriver {
    /// Establishes the WebSocket session to the controller and spawns the
    /// task that reads response frames for the lifetime of the connection.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate or if the WebSocket
    /// handshake with `ws://{addr}:{port}` fails. No retry loop: the
    /// controller and its operator portal are co-located, so an unreachable
    /// controller is an operator problem, not a transient to paper over.
    pub async fn connect(config: TnyDriverConfig) -> Result<TnyDriver, TnyError> {
        config.validate().map_err(TnyError::Configuration)?;

        let url = config.connection_url();
        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(|e| TnyError::FailedToConnect(e.to_string()))?;
        debug!("connected to {}", url);

        let (write_half, read_half) = stream.split();

        let driver = Self {
            config,
            ws_write: Arc::new(Mutex::new(write_half)),
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_request_id: Arc::new(Mutex::new(1)),
            connected: Arc::new(Mutex::new(true)),
        };

        let reader = driver.clone();
        tokio::spawn(async move {
            reader.read_responses(read_half).await;
        });

        Ok(driver)
    }

    /// Issues one command and awaits its response.
    ///
    /// Fails fast with `NotConnected` when no session is open. Otherwise the
    /// request is registered in the pending table, sent, and resolved by the
    /// read task when the frame with the matching request id arrives; the
    /// payload is then decoded per the command's declared return types.
    /// Responses to different requests may arrive in any order — same command
    /// id included — because every request carries its own correlation id.
    pub async fn send_command(
        &self,
        spec: &CommandSpec,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, TnyError> {
        if !*self.connected.lock().await {
            return Err(TnyError::NotConnected);
        }

        let id = self.take_request_id().await;
        let frame = Request::new(id, spec.id, args.to_vec()).encode();

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        if let Err(e) = self.ws_write.lock().await.send(Message::Binary(frame)).await {
            self.pending.lock().await.remove(&id);
            return Err(TnyError::FailedToSend(e.to_string()));
        }
        debug!("sent {} (0x{:02X}) as request {}", spec.name, spec.id, id);

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let response = match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(response)) => response,
            // The read task dropped the sender: the connection is gone.
            Ok(Err(_)) => return Err(TnyError::ConnectionLost),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                return Err(TnyError::Timeout(spec.name.to_string()));
            }
        };

        if !response.ok {
            return Err(TnyError::CommandRejected(spec.name.to_string()));
        }
        response.decode_values(spec.returns)
    }

    /// Sends a close frame and rejects everything still pending. Reconnecting
    /// means building a fresh driver; this one stays `NotConnected`.
    pub async fn disconnect(&self) {
        let _ = self.ws_write.lock().await.send(Message::Close(None)).await;
        self.drop_connection().await;
    }

    pub async fn is_connected(&self) -> bool {
        *self.connected.lock().await
    }

    async fn read_responses(&self, mut read_half: SplitStream<WsStream>) {
        while let Some(message) = read_half.next().await {
            match message {
                Ok(Message::Binary(data)) => match Response::parse(&data) {
                    Ok(response) => self.resolve_pending(response).await,
                    Err(e) => warn!("discarding malformed response frame: {}", e),
                },
                Ok(Message::Close(_)) => {
                    debug!("controller closed the connection");
                    break;
                }
                // Text, ping and pong frames are not part of the protocol.
                Ok(_) => {}
                Err(e) => {
                    warn!("websocket read error: {}", e);
                    break;
                }
            }
        }
        self.drop_connection().await;
    }

    async fn resolve_pending(&self, response: Response) {
        let sender = self.pending.lock().await.remove(&response.id);
        match sender {
            Some(tx) => {
                // The caller may have timed out meanwhile; nothing to do then.
                let _ = tx.send(response);
            }
            None => warn!("no pending request for response id {}", response.id),
        }
    }

    /// Marks the session dead and rejects every pending request by dropping
    /// its completion sender.
    async fn drop_connection(&self) {
        *self.connected.lock().await = false;
        self.pending.lock().await.clear();
    }

    async fn take_request_id(&self) -> u16 {
        let mut next = self.next_request_id.lock().await;
        let id = *next;
        // Id 0 marks a free correlation slot on the controller, skip it.
        *next = if *next == u16::MAX { 1 } else { *next + 1 };
        id
    }
}
