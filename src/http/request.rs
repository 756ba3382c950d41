//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser mínimo de la cabecera de un request. El body nunca se usa:
//! un servidor de archivos estáticos solo necesita el método, el path y
//! los headers.
//!
//! ## Formato
//!
//! ```text
//! GET /img/logo%20grande.png?v=2 HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! ```

use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Métodos HTTP reconocidos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// HEAD - Como GET pero solo retorna headers
    HEAD,

    /// POST - Siempre 405 en este servidor
    POST,

    /// PUT - Siempre 405 en este servidor
    PUT,

    /// DELETE - Siempre 405 en este servidor
    DELETE,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es reconocido
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        }
    }

    /// Métodos que modifican recursos; el servidor los rechaza con 405
    pub fn is_write(&self) -> bool {
        matches!(self, Method::POST | Method::PUT | Method::DELETE)
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Target tal como llegó (ej: "/a%20b.html?x=1")
    target: String,

    /// Path sin query ni fragmento, todavía codificado
    path: String,

    /// Headers con el nombre en minúsculas
    headers: HashMap<String, String>,

    /// Versión HTTP ("HTTP/1.0" o "HTTP/1.1")
    version: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,

    /// Formato inválido de la request line
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// Método HTTP desconocido
    #[error("Unsupported method ('{0}')")]
    UnsupportedMethod(String),

    /// Versión HTTP distinta de 1.0 / 1.1
    #[error("Invalid HTTP version: {0}")]
    InvalidHttpVersion(String),

    /// Header malformado
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Busca el fin de la cabecera: la primera línea vacía
///
/// Acepta `\r\n\r\n` y también `\n\n` (clientes como `nc`). Retorna el
/// índice donde termina la última línea de headers y el índice donde
/// empieza el body.
///
/// # Ejemplo
/// ```
/// use static_http::http::request::find_head_end;
///
/// assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n\r\nbody"), Some((15, 18)));
/// assert_eq!(find_head_end(b"GET / HTTP/1.1\n\nbody"), Some((14, 16)));
/// assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n"), None);
/// ```
pub fn find_head_end(buffer: &[u8]) -> Option<(usize, usize)> {
    (0..buffer.len())
        .filter(|&i| buffer[i] == b'\n')
        .find_map(|i| match &buffer[i + 1..] {
            [b'\n', ..] => Some((i, i + 2)),
            [b'\r', b'\n', ..] => Some((i, i + 3)),
            _ => None,
        })
}

impl Request {
    /// Parsea la cabecera de un request desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use static_http::http::Request;
    ///
    /// let raw = b"GET /docs/a%20b.html?v=1 HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/docs/a%20b.html");
    /// assert_eq!(request.decoded_path(), "/docs/a b.html");
    /// assert_eq!(request.header("host"), Some("localhost"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        // Lo que sigue a la línea vacía es body y se ignora
        let head = match find_head_end(buffer) {
            Some((end, _)) => &buffer[..end],
            None => buffer,
        };

        if head.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::EmptyRequest);
        }

        // Líneas terminadas en "\r\n" o en "\n" solo
        let mut lines = head
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line));
        let request_line = lines.next().ok_or(ParseError::InvalidRequestLine)?;

        // 1. Request line (UTF-8 estricto)
        let request_line =
            std::str::from_utf8(request_line).map_err(|_| ParseError::InvalidRequestLine)?;
        let (method, target, version) = Self::parse_request_line(request_line)?;

        // 2. Headers hasta la línea vacía
        let headers = Self::parse_headers(lines)?;

        let path = Self::strip_query_and_fragment(&target).to_string();

        Ok(Request {
            method,
            target,
            path,
            headers,
            version,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path?query HTTP/1.1`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD TARGET VERSION
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_str(parts[0])?;

        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok((method, parts[1].to_string(), version))
    }

    /// Corta el target en el primer '?' o '#'
    fn strip_query_and_fragment(target: &str) -> &str {
        match target.find(['?', '#']) {
            Some(end) => &target[..end],
            None => target,
        }
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato: "Name: Value". El nombre se guarda en
    /// minúsculas para buscarlo sin importar mayúsculas.
    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a [u8]>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            // Los valores pueden traer obs-text: se leen como ISO-8859-1
            let line: String = line.iter().map(|&b| char::from(b)).collect();

            // La línea vacía marca el fin de los headers
            if line.trim().is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
                }
                _ => return Err(ParseError::InvalidHeader(line)),
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Target completo, con query y fragmento
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Path sin query ni fragmento, todavía codificado
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path con percent-decoding aplicado
    ///
    /// Las secuencias que no forman UTF-8 válido se reemplazan por U+FFFD.
    pub fn decoded_path(&self) -> String {
        percent_decode_str(&self.path)
            .decode_utf8_lossy()
            .into_owned()
    }

    /// Obtiene un header específico (nombre sin importar mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }
}
