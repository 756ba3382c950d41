//! Tipos de error del servidor y del cliente

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Resultado de las operaciones de arranque y ejecución del servidor
pub type Result<T> = std::result::Result<T, Error>;

/// Errores que detienen el servidor (nunca los de un request individual)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuración inválida
    #[error("Configuration error: {0}")]
    Config(String),

    /// No se pudo resolver host:port a una dirección
    #[error("Could not resolve address {0}")]
    Resolve(String),

    /// Falló el bind del socket de escucha
    #[error("Could not bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resultado de servir un archivo; se traduce a 404 o 500
#[derive(Error, Debug)]
pub enum ServeError {
    /// No existe, no es un archivo regular o sale del static root
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Cualquier otro fallo de I/O al resolver o leer
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Errores del cliente HTTP
#[derive(Error, Debug)]
pub enum ClientError {
    /// No se pudo abrir la conexión TCP
    #[error("Could not connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Error leyendo o escribiendo el socket o el archivo de salida
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// La respuesta no tiene la forma esperada
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Falló la serialización del resumen JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
