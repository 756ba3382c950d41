//! # Módulo HTTP
//!
//! Implementación mínima del protocolo HTTP/1.1 que necesita un servidor
//! de archivos estáticos:
//!
//! - Parsing de la cabecera del request
//! - Construcción de responses
//! - Códigos de estado
//! - Tabla de MIME types por extensión
//!
//! No hay conexiones persistentes: cada conexión lleva un único
//! intercambio request/response y después se cierra.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```

pub mod mime;
pub mod request;
pub mod response;
pub mod status;

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
