//! # Handler de Archivos Estáticos
//! src/handler/mod.rs
//!
//! Convierte un request ya parseado en exactamente una respuesta.
//!
//! ```text
//! Request → método → path decodificado → static root → archivo → Response
//! ```
//!
//! | Caso                              | Respuesta                  |
//! |-----------------------------------|----------------------------|
//! | POST / PUT / DELETE               | 405 Method Not Allowed     |
//! | archivo regular                   | 200 + Content-Type/Length  |
//! | no existe / no es archivo         | 404 File Not Found         |
//! | error de I/O                      | 500 con el detalle en body |
//!
//! Los errores nunca salen de `handle`: todo termina en una `Response`.

use crate::error::ServeError;
use crate::files::{is_within_root, resolve_path};
use crate::http::mime::guess_mime_type;
use crate::http::{Method, Request, Response, StatusCode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Valor del header `Server`
pub const SERVER_NAME: &str = concat!("static_http/", env!("CARGO_PKG_VERSION"));

/// Handler sin estado mutable; se comparte entre threads con `Arc`
#[derive(Debug, Clone)]
pub struct StaticFiles {
    /// Directorio base absoluto
    root: PathBuf,

    /// Si es true, los paths que salen del root responden 404
    confine: bool,
}

impl StaticFiles {
    /// Crea un handler sobre `root`
    pub fn new(root: impl Into<PathBuf>, confine: bool) -> Self {
        Self {
            root: root.into(),
            confine,
        }
    }

    /// Static root de este handler
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Procesa un request y siempre retorna una respuesta
    ///
    /// # Ejemplo
    /// ```
    /// use static_http::handler::StaticFiles;
    /// use static_http::http::{Request, StatusCode};
    ///
    /// let files = StaticFiles::new("/nonexistent-root", true);
    /// let request = Request::parse(b"DELETE /index.html HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(files.handle(&request).status(), StatusCode::MethodNotAllowed);
    /// ```
    pub fn handle(&self, request: &Request) -> Response {
        let method = request.method();

        let response = if method.is_write() {
            // Sin acceso al filesystem
            Response::error(StatusCode::MethodNotAllowed, "Method Not Allowed")
        } else {
            let path = request.decoded_path();
            match self.serve(&path, method) {
                Ok(response) => response,
                Err(ServeError::NotFound(file)) => {
                    tracing::debug!(path = %path, file = %file.display(), "file not found");
                    Response::error(StatusCode::NotFound, "File Not Found")
                }
                Err(ServeError::Io(e)) => {
                    tracing::warn!(path = %path, error = %e, "failed to serve file");
                    Response::error(
                        StatusCode::InternalServerError,
                        &format!("Internal Server Error: {}", e),
                    )
                }
            }
        };

        let mut response = if method == Method::HEAD {
            response.into_head()
        } else {
            response
        };
        add_common_headers(&mut response);
        response
    }

    /// Resuelve el path y arma la respuesta 200
    ///
    /// Para HEAD no se lee el archivo: el tamaño sale de los metadatos.
    fn serve(&self, url_path: &str, method: Method) -> Result<Response, ServeError> {
        let file = resolve_path(&self.root, url_path);

        if self.confine && !is_within_root(&self.root, &file) {
            return Err(ServeError::NotFound(file));
        }

        let metadata = match fs::metadata(&file) {
            Ok(metadata) => metadata,
            Err(e) if is_missing(&e) => return Err(ServeError::NotFound(file)),
            Err(e) => return Err(ServeError::Io(e)),
        };
        if !metadata.is_file() {
            return Err(ServeError::NotFound(file));
        }

        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", guess_mime_type(&file));

        let response = if method == Method::HEAD {
            response.with_header("Content-Length", &metadata.len().to_string())
        } else {
            response.with_body_bytes(fs::read(&file)?)
        };
        Ok(response)
    }
}

/// Agrega headers comunes a todas las respuestas
pub fn add_common_headers(response: &mut Response) {
    response.add_header("Date", &httpdate::fmt_http_date(SystemTime::now()));
    response.add_header("Server", SERVER_NAME);
    response.add_header("Connection", "close");
}

/// Errores de `stat` que significan "no hay archivo ahí"
///
/// `InvalidInput` cubre paths con un byte NUL (`%00`).
fn is_missing(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidInput
    )
}
