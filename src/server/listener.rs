use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::error::ServerError;

/// Pending-connection queue depth. The server is not built for bursts.
pub const LISTEN_BACKLOG: u32 = 5;

/// A bound, listening stream socket.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Binds all local interfaces on `port`.
    pub fn on_port(port: u16) -> Result<Self, ServerError> {
        Self::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }

    /// Binds `addr` and starts listening. Must be called inside a Tokio
    /// runtime.
    pub fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let listen = || -> io::Result<TcpListener> {
            let socket = if addr.is_ipv4() {
                TcpSocket::new_v4()?
            } else {
                TcpSocket::new_v6()?
            };
            socket.set_reuseaddr(true)?;
            socket.bind(addr)?;
            socket.listen(LISTEN_BACKLOG)
        };

        listen()
            .map(|inner| Self { inner })
            .map_err(|source| ServerError::Bind {
                port: addr.port(),
                source,
            })
    }

    /// Waits for the next peer to connect.
    pub async fn accept(&self) -> io::Result<(TcpStream, SocketAddr)> {
        self.inner.accept().await
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }
}
