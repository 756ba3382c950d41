// Creación del socket de escucha con SO_REUSEADDR, para que un servidor
// reiniciado pueda volver a hacer bind mientras el puerto sigue en TIME_WAIT.

use crate::error::{Error, Result};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};

/// Cola de conexiones pendientes del `listen`
const BACKLOG: i32 = 128;

/// Resuelve host:port prefiriendo IPv4 (`localhost` → 127.0.0.1)
pub fn resolve_address(host: &str, port: u16) -> Result<SocketAddr> {
    let candidates: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|e| Error::Resolve(format!("{}:{} ({})", host, port, e)))?
        .collect();

    candidates
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| candidates.first())
        .copied()
        .ok_or_else(|| Error::Resolve(format!("{}:{}", host, port)))
}

/// Crea un `TcpListener` bloqueante con `SO_REUSEADDR` habilitado
pub fn create_reusable_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    Ok(socket.into())
}
