use log::*;
use scoreboard_common::game_state::GameState;
use std::{
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
};
use thiserror::Error;
use tokio::{
    net::UdpSocket,
    time::{Duration, sleep},
};

/// Sent once to the scoreboard server so it starts sending us updates.
pub const HANDSHAKE: &[u8] = b"handshake";
const MAX_DATAGRAM_LEN: usize = 65_507;
const RECV_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Failed to bind a local UDP socket: {0}")]
    Bind(#[source] io::Error),
    #[error("Failed to connect to {addr}: {source}")]
    Connect { addr: SocketAddr, source: io::Error },
    #[error("Failed to send the handshake to {addr}: {source}")]
    Handshake { addr: SocketAddr, source: io::Error },
}

pub struct StateReceiver {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl StateReceiver {
    pub async fn connect(addr: SocketAddr) -> Result<Self, NetworkError> {
        let local: SocketAddr = if addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local).await.map_err(NetworkError::Bind)?;
        socket
            .connect(addr)
            .await
            .map_err(|source| NetworkError::Connect { addr, source })?;
        socket
            .send(HANDSHAKE)
            .await
            .map_err(|source| NetworkError::Handshake { addr, source })?;
        info!("Connected to scoreboard server at {addr}");

        Ok(Self {
            socket,
            buf: vec![0u8; MAX_DATAGRAM_LEN],
        })
    }

    /// Waits for the next datagram that decodes into a [`GameState`].
    ///
    /// Datagrams that don't decode are discarded, socket errors are logged and retried.
    pub async fn next_state(&mut self) -> GameState {
        loop {
            match self.socket.recv(&mut self.buf).await {
                Ok(len) => match GameState::decode(&self.buf[..len]) {
                    Ok(state) => return state,
                    Err(e) => warn!("Corrupted game state discarded: {e}"),
                },
                Err(e) => {
                    error!("Error receiving from scoreboard server: {e}");
                    sleep(RECV_RETRY_DELAY).await;
                }
            }
        }
    }
}
