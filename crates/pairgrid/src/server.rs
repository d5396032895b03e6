//! `PairgridServer` builder and accept loop.
//!
//! This is the entry point for running a Pairgrid server. It ties the
//! layers together: transport → protocol → room.

use std::sync::Arc;

use pairgrid_protocol::{Codec, JsonCodec};
use pairgrid_room::{RoomConfig, RoomManager};
use pairgrid_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::PairgridError;
use crate::handler::handle_connection;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks; the
/// matchmaker sits behind a `Mutex` because joins and disconnects
/// mutate the registry.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) rooms: Mutex<RoomManager>,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a Pairgrid server.
///
/// # Example
///
/// ```rust,no_run
/// use pairgrid::PairgridServerBuilder;
///
/// # async fn run() -> Result<(), pairgrid::PairgridError> {
/// let server = PairgridServerBuilder::new()
///     .bind("0.0.0.0:1234")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct PairgridServerBuilder {
    bind_addr: String,
    room_config: RoomConfig,
}

impl PairgridServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:1234".to_string(),
            room_config: RoomConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the configuration applied to every room (resolve delay).
    pub fn room_config(mut self, config: RoomConfig) -> Self {
        self.room_config = config;
        self
    }

    /// Builds the server with the default JSON codec.
    pub async fn build(
        self,
    ) -> Result<PairgridServer<JsonCodec>, PairgridError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            rooms: Mutex::new(RoomManager::new(self.room_config)),
            codec: JsonCodec,
        });

        Ok(PairgridServer { transport, state })
    }
}

impl Default for PairgridServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Pairgrid server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct PairgridServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> PairgridServer<C> {
    /// Creates a new builder.
    pub fn builder() -> PairgridServerBuilder {
        PairgridServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a dispatcher task for
    /// each. Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), PairgridError> {
        tracing::info!("pairgrid server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(handle_connection(conn, state));
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
