//! Inicialización de `tracing`
//!
//! `RUST_LOG` tiene prioridad; si no está definido se usa el nivel por
//! defecto que recibe `init` (por ejemplo el de `--log-level`).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global; llamadas repetidas se ignoran
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
