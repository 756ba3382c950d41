//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Hace bind con SO_REUSEADDR
//! 2. Acepta conexiones en un loop
//! 3. Atiende cada conexión en su propio thread (un request, una respuesta)
//! 4. Se detiene cuando alguien usa su `ShutdownHandle`

pub mod listener;
pub mod shutdown;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use shutdown::ShutdownHandle;
pub use tcp::Server;
