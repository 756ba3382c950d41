//! # Cliente HTTP mínimo
//! src/client.rs
//!
//! Un GET por invocación, escrito a mano sobre un `TcpStream`:
//!
//! ```text
//! GET /logo.png HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! ```
//!
//! Lee hasta que el servidor cierra la conexión (el servidor nunca
//! mantiene conexiones abiertas) y separa cabecera y body en el primer
//! `\r\n\r\n`. No hay chunked, redirects ni streaming.

use crate::config::ClientConfig;
use crate::error::ClientError;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::net::TcpStream;

/// Construye el request literal que se envía al servidor
///
/// # Ejemplo
/// ```
/// use static_http::client::build_request;
///
/// assert_eq!(
///     build_request("/", "localhost", 8080),
///     "GET / HTTP/1.1\r\nHost: localhost:8080\r\n\r\n"
/// );
/// ```
pub fn build_request(resource: &str, server: &str, port: u16) -> String {
    format!("GET {} HTTP/1.1\r\nHost: {}:{}\r\n\r\n", resource, server, port)
}

/// Envía el request y lee la respuesta completa hasta EOF
pub fn send_request(config: &ClientConfig) -> Result<Vec<u8>, ClientError> {
    let addr = config.address();
    let mut stream = TcpStream::connect((config.server.as_str(), config.server_port))
        .map_err(|source| ClientError::Connect { addr: addr.clone(), source })?;

    let request = build_request(&config.resource, &config.server, config.server_port);
    stream.write_all(request.as_bytes())?;
    stream.flush()?;
    tracing::debug!(addr = %addr, resource = %config.resource, "request sent");

    let mut response = Vec::new();
    stream.read_to_end(&mut response)?;
    tracing::debug!(bytes = response.len(), "response received");

    Ok(response)
}

/// Respuesta separada en status, headers y body
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    status: u16,
    reason: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    raw: Vec<u8>,
}

/// Resumen serializable de una respuesta (`--json`)
#[derive(Debug, Serialize)]
pub struct ResponseSummary {
    pub status: u16,
    pub reason: String,
    pub headers: BTreeMap<String, String>,
    pub body_bytes: usize,
}

/// Qué hace el cliente con la respuesta
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// El servidor respondió 404
    NotFound,

    /// Content-Type image/*: el body se guarda en un archivo
    Image(&'a [u8]),

    /// Cualquier otra cosa: se imprime la respuesta cruda
    Text(Cow<'a, str>),
}

impl ParsedResponse {
    /// Separa la respuesta cruda en el primer `\r\n\r\n`
    pub fn parse(raw: Vec<u8>) -> Result<Self, ClientError> {
        let split = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .ok_or_else(|| ClientError::MalformedResponse("missing end of headers".to_string()))?;

        let head = String::from_utf8_lossy(&raw[..split]).to_string();
        let body = raw[split + 4..].to_vec();

        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap_or_default();
        let (status, reason) = Self::parse_status_line(status_line)?;

        let headers = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect();

        Ok(Self {
            status,
            reason,
            headers,
            body,
            raw,
        })
    }

    /// Formato: `HTTP/1.1 404 File Not Found`
    fn parse_status_line(line: &str) -> Result<(u16, String), ClientError> {
        let mut parts = line.splitn(3, ' ');
        let version = parts.next().unwrap_or_default();
        if !version.starts_with("HTTP/") {
            return Err(ClientError::MalformedResponse(format!("bad status line: {}", line)));
        }

        let status = parts
            .next()
            .and_then(|code| code.parse::<u16>().ok())
            .ok_or_else(|| ClientError::MalformedResponse(format!("bad status code: {}", line)))?;
        let reason = parts.next().unwrap_or_default().to_string();

        Ok((status, reason))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Busca un header sin importar mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Respuesta completa como texto (UTF-8 con reemplazo)
    pub fn raw_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    pub fn is_image(&self) -> bool {
        self.header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("image"))
    }

    /// Decide qué hacer con la respuesta
    pub fn outcome(&self) -> Outcome<'_> {
        if self.status == 404 {
            Outcome::NotFound
        } else if self.is_image() {
            Outcome::Image(&self.body)
        } else {
            Outcome::Text(self.raw_text())
        }
    }

    pub fn summary(&self) -> ResponseSummary {
        ResponseSummary {
            status: self.status,
            reason: self.reason.clone(),
            headers: self.headers.iter().cloned().collect(),
            body_bytes: self.body.len(),
        }
    }
}

/// Ejecuta el cliente completo y escribe los mensajes en `out`
pub fn run(config: &ClientConfig, out: &mut impl Write) -> Result<(), ClientError> {
    let response = ParsedResponse::parse(send_request(config)?)?;

    if config.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&response.summary())?)?;
        return Ok(());
    }

    match response.outcome() {
        Outcome::NotFound => writeln!(out, "Resource Not Found")?,
        Outcome::Image(body) => {
            std::fs::write(&config.output, body)?;
            writeln!(out, "Image saved as {}", config.output.display())?;
        }
        Outcome::Text(text) => writeln!(out, "{}", text)?,
    }
    Ok(())
}
