//! Detección del Content-Type a partir de la extensión del archivo.

use std::path::Path;

/// Tipo usado cuando la extensión no está en la tabla
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Tabla fija extensión → MIME type (sensible a mayúsculas)
pub const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("css", "text/css"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
];

/// Retorna el MIME type de un archivo según su extensión
///
/// La extensión es lo que sigue al último punto del último segmento;
/// un nombre como `.profile` no tiene extensión.
///
/// # Ejemplo
/// ```
/// use static_http::http::mime::guess_mime_type;
///
/// assert_eq!(guess_mime_type("static/index.html"), "text/html");
/// assert_eq!(guess_mime_type("static/app.js"), "application/octet-stream");
/// ```
pub fn guess_mime_type(path: impl AsRef<Path>) -> &'static str {
    let Some(ext) = path.as_ref().extension().and_then(|ext| ext.to_str()) else {
        return DEFAULT_MIME_TYPE;
    };

    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
}
