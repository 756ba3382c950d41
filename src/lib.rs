//! # Static HTTP
//! src/lib.rs
//!
//! Servidor HTTP/1.1 multi-thread que sirve archivos estáticos desde un
//! directorio base, más un cliente mínimo que hace un único GET sobre un
//! socket TCP.
//!
//! ## Arquitectura
//!
//! - `http`: Parsing de requests, construcción de responses, status codes, MIME types
//! - `files`: Resolución de paths de URL dentro del static root
//! - `handler`: Request → Response (200 / 404 / 405 / 500)
//! - `server`: Listener TCP, un thread por conexión, apagado explícito
//! - `client`: Cliente de un solo GET
//! - `config`: Argumentos CLI de ambos binarios
//! - `error`: Tipos de error
//! - `logging`: Subscriber de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use static_http::config::ServerConfig;
//! use static_http::server::Server;
//!
//! let config = ServerConfig::default();
//! let server = Server::bind(&config).expect("Error al hacer bind");
//! let handle = server.shutdown_handle();
//! // handle.shutdown() desde otro thread detiene el loop
//! server.run().expect("Error en el servidor");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod files;
pub mod handler;
pub mod http;
pub mod logging;
pub mod server;
