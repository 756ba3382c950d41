//! # Configuración del Servidor y del Cliente
//! src/config.rs
//!
//! Argumentos CLI (con variables de entorno como respaldo) de los dos
//! binarios.
//!
//! ## Ejemplos de uso
//!
//! ### Servidor
//! ```bash
//! ./static_http --host 0.0.0.0 --port 8080 --static-dir ./public
//! HTTP_PORT=9000 STATIC_DIR=/srv/www ./static_http
//! ```
//!
//! ### Cliente
//! ```bash
//! ./http_client --server localhost --server-port 8080 --resource /logo.png
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuración del servidor de archivos estáticos
#[derive(Debug, Clone, Parser)]
#[command(name = "static_http")]
#[command(about = "Servidor HTTP/1.1 multi-thread de archivos estáticos")]
#[command(version)]
pub struct ServerConfig {
    /// Host/IP en el que escucha
    #[arg(long, default_value = "localhost", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Directorio de archivos estáticos; si es relativo se une al directorio actual
    #[arg(long, default_value = "static", env = "STATIC_DIR")]
    pub static_dir: PathBuf,

    /// Permite que paths con `..` salgan del static root
    #[arg(long)]
    pub allow_escape: bool,

    /// Timeout de lectura/escritura por conexión en ms (0 = sin timeout)
    #[arg(long = "io-timeout-ms", default_value = "0", env = "IO_TIMEOUT_MS")]
    pub io_timeout_ms: u64,

    /// Nivel de log cuando RUST_LOG no está definido
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl ServerConfig {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        ServerConfig::parse()
    }

    /// Dirección para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use static_http::config::ServerConfig;
    ///
    /// let config = ServerConfig::default();
    /// assert_eq!(config.address(), "localhost:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Static root absoluto, calculado una sola vez al arrancar
    pub fn static_root(&self) -> std::io::Result<PathBuf> {
        Ok(Self::absolute_under(&std::env::current_dir()?, &self.static_dir))
    }

    fn absolute_under(base: &Path, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            base.join(dir)
        }
    }

    /// Timeout de socket, si está habilitado
    pub fn io_timeout(&self) -> Option<Duration> {
        (self.io_timeout_ms > 0).then(|| Duration::from_millis(self.io_timeout_ms))
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.static_dir.as_os_str().is_empty() {
            return Err("Static dir must not be empty".to_string());
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self, static_root: &Path) {
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("📁 Files:");
        println!("   Static root:  {}", static_root.display());
        println!(
            "   Containment:  {}",
            if self.allow_escape { "disabled (--allow-escape)" } else { "enabled" }
        );
        match self.io_timeout() {
            Some(timeout) => println!("   IO timeout:   {} ms", timeout.as_millis()),
            None => println!("   IO timeout:   disabled"),
        }
        println!();
    }
}

impl Default for ServerConfig {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            static_dir: PathBuf::from("static"),
            allow_escape: false,
            io_timeout_ms: 0,
            log_level: "info".to_string(),
        }
    }
}

/// Configuración del cliente de un solo GET
#[derive(Debug, Clone, Parser)]
#[command(name = "http_client")]
#[command(about = "Cliente HTTP mínimo: un GET sobre un socket TCP")]
#[command(version)]
pub struct ClientConfig {
    /// Dirección del servidor
    #[arg(long, default_value = "localhost")]
    pub server: String,

    /// Puerto del servidor
    #[arg(long = "server-port", default_value = "8080")]
    pub server_port: u16,

    /// Recurso a pedir
    #[arg(long, default_value = "/")]
    pub resource: String,

    /// Archivo donde se guarda una imagen recibida
    #[arg(short, long, default_value = "resource.png")]
    pub output: PathBuf,

    /// Imprime un resumen JSON de la respuesta en vez del texto crudo
    #[arg(long)]
    pub json: bool,
}

impl ClientConfig {
    /// Dirección del servidor (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.server_port)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: "localhost".to_string(),
            server_port: 8080,
            resource: "/".to_string(),
            output: PathBuf::from("resource.png"),
            json: false,
        }
    }
}
