//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor que maneja múltiples conexiones simultáneas con un thread por
//! conexión. Los threads quedan desacoplados (nadie hace `join`): al
//! apagar, el proceso termina sin esperarlos.

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::handler::{add_common_headers, StaticFiles};
use crate::http::request::find_head_end;
use crate::http::{ParseError, Request, Response, StatusCode};
use crate::server::listener::{create_reusable_listener, resolve_address};
use crate::server::shutdown::ShutdownHandle;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Tamaño máximo de la cabecera de un request
const MAX_HEAD_BYTES: usize = 8192;

/// Servidor HTTP/1.1 de archivos estáticos
pub struct Server {
    files: Arc<StaticFiles>,
    listener: TcpListener,
    local_addr: SocketAddr,
    io_timeout: Option<Duration>,
    shutdown: ShutdownHandle,
}

impl Server {
    /// Valida la configuración, calcula el static root y hace bind
    pub fn bind(config: &ServerConfig) -> Result<Self> {
        config.validate().map_err(Error::Config)?;

        let root = config.static_root()?;
        if !root.is_dir() {
            tracing::warn!(root = %root.display(), "static root is not a directory; every file will be 404");
        }

        let addr = resolve_address(&config.host, config.port)?;
        let listener =
            create_reusable_listener(addr).map_err(|source| Error::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        tracing::info!(addr = %local_addr, root = %root.display(), "listening");

        Ok(Self {
            files: Arc::new(StaticFiles::new(root, !config.allow_escape)),
            listener,
            local_addr,
            io_timeout: config.io_timeout(),
            shutdown: ShutdownHandle::new(local_addr),
        })
    }

    /// Dirección real en la que escucha (útil con puerto 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Static root del que se sirven los archivos
    pub fn static_root(&self) -> &Path {
        self.files.root()
    }

    /// Handle para detener el loop de `accept` desde otro thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Acepta conexiones hasta que se pida el apagado
    ///
    /// Al retornar, el listener se cierra; las conexiones en curso siguen
    /// en sus threads hasta que el proceso termine.
    pub fn run(self) -> Result<()> {
        tracing::info!("concurrent mode: one thread per connection");

        let mut connection_id: u64 = 0;

        for stream in self.listener.incoming() {
            if self.shutdown.is_shutdown() {
                // Puede ser la conexión de wake o un cliente real que llegó tarde
                if let Ok(stream) = &stream {
                    let peer = stream.peer_addr().map(|addr| addr.to_string());
                    tracing::debug!(
                        peer = %peer.as_deref().unwrap_or("unknown"),
                        "dropping connection accepted during shutdown"
                    );
                }
                tracing::info!("shutdown requested, closing listener");
                break;
            }

            match stream {
                Ok(stream) => {
                    connection_id += 1;
                    let files = Arc::clone(&self.files);
                    let io_timeout = self.io_timeout;

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    tracing::debug!(id = connection_id, peer = %peer_addr, "new connection");

                    let spawned = thread::Builder::new()
                        .name(format!("conn-{}", connection_id))
                        .spawn(move || {
                            if let Err(e) =
                                Self::handle_connection(stream, &files, io_timeout, &peer_addr)
                            {
                                tracing::warn!(peer = %peer_addr, error = %e, "connection error");
                            }
                        });

                    if let Err(e) = spawned {
                        tracing::error!(id = connection_id, error = %e, "failed to spawn connection thread");
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to accept connection");
                }
            }
        }

        Ok(())
    }

    /// Un intercambio request/response completo sobre una conexión
    fn handle_connection(
        mut stream: TcpStream,
        files: &StaticFiles,
        io_timeout: Option<Duration>,
        peer_addr: &str,
    ) -> std::io::Result<()> {
        let start = Instant::now();

        if io_timeout.is_some() {
            stream.set_read_timeout(io_timeout)?;
            stream.set_write_timeout(io_timeout)?;
        }

        let head = Self::read_request_head(&mut stream)?;
        if head.is_empty() {
            tracing::debug!(peer = %peer_addr, "connection closed without a request");
            return Ok(());
        }

        let (response, method, target) = match Request::parse(&head) {
            Ok(request) => {
                tracing::debug!(
                    method = request.method().as_str(),
                    target = request.target(),
                    version = request.version(),
                    user_agent = request.header("User-Agent").unwrap_or("-"),
                    "request parsed"
                );
                let response = files.handle(&request);
                (response, request.method().as_str(), request.target().to_string())
            }
            Err(e) => {
                tracing::warn!(peer = %peer_addr, error = %e, "invalid request");
                (Self::parse_error_response(&e), "-", "-".to_string())
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        tracing::info!(
            peer = %peer_addr,
            method,
            target = %target,
            status = response.status().as_u16(),
            bytes = response.body().len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "request served"
        );

        Ok(())
    }

    /// Lee hasta el fin de los headers (`\r\n\r\n` o `\n\n`), EOF o `MAX_HEAD_BYTES`
    fn read_request_head(stream: &mut impl Read) -> std::io::Result<Vec<u8>> {
        let mut head = Vec::with_capacity(1024);
        let mut chunk = [0u8; 1024];

        loop {
            let bytes_read = stream.read(&mut chunk)?;
            if bytes_read == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..bytes_read]);

            if find_head_end(&head).is_some() || head.len() >= MAX_HEAD_BYTES {
                break;
            }
        }

        Ok(head)
    }

    /// Respuesta para un request que no se pudo parsear
    fn parse_error_response(error: &ParseError) -> Response {
        let status = match error {
            ParseError::UnsupportedMethod(_) => StatusCode::NotImplemented,
            ParseError::InvalidHttpVersion(_) => StatusCode::HttpVersionNotSupported,
            ParseError::EmptyRequest
            | ParseError::InvalidRequestLine
            | ParseError::InvalidHeader(_) => StatusCode::BadRequest,
        };

        let mut response = Response::error(status, &error.to_string());
        add_common_headers(&mut response);
        response
    }
}
