//! # Construcción de Respuestas HTTP
//!
//! API para construir respuestas HTTP/1.1 y convertirlas a bytes. La
//! respuesta completa se arma en memoria antes de escribir el primer byte
//! al socket, así un error nunca deja headers a medio enviar.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 404 File Not Found\r\n
//! Content-Type: text/plain; charset=utf-8\r\n
//! Content-Length: 26\r\n
//! \r\n
//! Error 404: File Not Found
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use static_http::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/html")
//!     .with_body("<h1>Hola</h1>");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::StatusCode;

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Reason phrase propia; si falta se usa la estándar del código
    reason: Option<String>,

    /// Headers en orden de inserción, sin nombres duplicados
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            reason: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe (sin importar mayúsculas), se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo desde bytes (imágenes, binarios)
    ///
    /// # Ejemplo
    /// ```
    /// use static_http::http::{Response, StatusCode};
    ///
    /// let png = vec![0x89, 0x50, 0x4E, 0x47];
    /// let response = Response::new(StatusCode::Ok).with_body_bytes(png);
    /// assert_eq!(response.header("Content-Length"), Some("4"));
    /// ```
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let len = self.body.len().to_string();
        self.add_header("Content-Length", &len);
        self
    }

    /// Reemplaza la reason phrase de la status line
    ///
    /// Los caracteres de control se cambian por espacios para que el
    /// mensaje no pueda partir la status line.
    pub fn with_reason(mut self, reason: &str) -> Self {
        let clean: String = reason
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        self.reason = Some(clean);
        self
    }

    /// Crea una respuesta de error en texto plano
    ///
    /// El mensaje se usa como reason phrase y como body, así el cliente
    /// puede detectar `404 File Not Found` en la cabecera.
    ///
    /// # Ejemplo
    /// ```
    /// use static_http::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound, "File Not Found");
    /// let text = String::from_utf8(response.to_bytes()).unwrap();
    /// assert!(text.starts_with("HTTP/1.1 404 File Not Found\r\n"));
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = format!("Error {}: {}\n", status.as_u16(), message);
        Self::new(status)
            .with_reason(message)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body(&body)
    }

    /// Quita el body conservando los headers (respuesta a HEAD)
    ///
    /// `Content-Length` sigue indicando el tamaño que tendría el body.
    pub fn into_head(mut self) -> Self {
        self.body.clear();
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        let status_line = format!("HTTP/1.1 {} {}\r\n", self.status.as_u16(), self.reason());
        result.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase efectiva (propia o estándar)
    pub fn reason(&self) -> &str {
        self.reason
            .as_deref()
            .unwrap_or_else(|| self.status.reason_phrase())
    }

    /// Busca un header sin importar mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
