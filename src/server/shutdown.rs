//! Handle de apagado del servidor
//!
//! El loop de `accept` queda bloqueado en el socket, así que el handle
//! hace dos cosas: marca el flag y abre una conexión a la dirección local
//! para despertar al `accept`. El loop ve el flag y termina.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const WAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// Handle clonable que se pasa explícitamente a quien deba detener el servidor
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    requested: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl ShutdownHandle {
    /// Crea el handle para un listener escuchando en `local_addr`
    pub(crate) fn new(local_addr: SocketAddr) -> Self {
        Self {
            requested: Arc::new(AtomicBool::new(false)),
            wake_addr: wake_address(local_addr),
        }
    }

    /// Pide el apagado; llamadas repetidas no tienen efecto
    pub fn shutdown(&self) {
        if self.requested.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = TcpStream::connect_timeout(&self.wake_addr, WAKE_TIMEOUT) {
            // El listener ya puede estar cerrado
            tracing::debug!(addr = %self.wake_addr, error = %e, "wake-up connection failed");
        }
    }

    /// Indica si ya se pidió el apagado
    pub fn is_shutdown(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Una dirección 0.0.0.0 / :: no sirve para conectarse: se usa loopback
fn wake_address(local_addr: SocketAddr) -> SocketAddr {
    let ip = match local_addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, local_addr.port())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_wake_address() {
        assert_eq!(
            wake_address("0.0.0.0:8080".parse().unwrap()),
            "127.0.0.1:8080".parse().unwrap()
        );
        assert_eq!(wake_address("[::]:80".parse().unwrap()), "[::1]:80".parse().unwrap());
        assert_eq!(
            wake_address("192.168.1.5:9000".parse().unwrap()),
            "192.168.1.5:9000".parse().unwrap()
        );
    }

    #[test]
    fn test_shutdown_sets_flag_and_wakes_accept() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let handle = ShutdownHandle::new(listener.local_addr().unwrap());
        let clone = handle.clone();

        assert!(!handle.is_shutdown());
        clone.shutdown();
        assert!(handle.is_shutdown());

        // La conexión de despertar quedó en la cola del listener
        assert!(listener.accept().is_ok());
    }

    #[test]
    fn test_shutdown_without_listener() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let handle = ShutdownHandle::new(addr);
        handle.shutdown();
        handle.shutdown();
        assert!(handle.is_shutdown());
    }
}
