//! # Static HTTP - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos estáticos. Ctrl+C cierra el
//! listener y termina el proceso con código 0.

use anyhow::Context;
use static_http::config::ServerConfig;
use static_http::logging;
use static_http::server::Server;

fn main() -> anyhow::Result<()> {
    let config = ServerConfig::new();
    logging::init(&config.log_level);

    println!("=================================");
    println!("  Static HTTP/1.1 Server");
    println!("=================================\n");

    let server = Server::bind(&config).context("failed to start server")?;
    config.print_summary(server.static_root());

    let handle = server.shutdown_handle();
    ctrlc::set_handler(move || {
        println!("\nShutting down server...");
        handle.shutdown();
    })
    .context("failed to install Ctrl+C handler")?;

    println!(
        "Server running at: http://{}:{} ...\n",
        config.host,
        server.local_addr().port()
    );

    server.run()?;

    println!("Shutdown complete.");
    Ok(())
}
