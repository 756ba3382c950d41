//! # HTTP Client - Entry Point
//! src/bin/http_client.rs
//!
//! Hace un único GET y, según la respuesta, imprime el texto, guarda la
//! imagen o avisa que el recurso no existe.

use clap::Parser;
use static_http::client;
use static_http::config::ClientConfig;
use static_http::logging;

fn main() -> anyhow::Result<()> {
    let config = ClientConfig::parse();
    logging::init("warn");

    let stdout = std::io::stdout();
    client::run(&config, &mut stdout.lock())?;
    Ok(())
}
