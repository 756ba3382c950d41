//! # Códigos de Estado HTTP
//!
//! Este módulo define los códigos de estado HTTP/1.1 que usa el servidor
//! de archivos estáticos. Se agrupan en las categorías habituales:
//!
//! - **2xx**: Éxito (200 OK)
//! - **4xx**: Error del cliente (400, 404, 405)
//! - **5xx**: Error del servidor (500, 501, 505)

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - El archivo existe y se sirve
    Ok = 200,

    /// 400 Bad Request - Request line o header malformado
    BadRequest = 400,

    /// 404 Not Found - El archivo no existe bajo el static root
    NotFound = 404,

    /// 405 Method Not Allowed - POST, PUT o DELETE
    MethodNotAllowed = 405,

    /// 500 Internal Server Error - Error de I/O al resolver o leer
    InternalServerError = 500,

    /// 501 Not Implemented - Método desconocido
    NotImplemented = 501,

    /// 505 HTTP Version Not Supported - Versión distinta de 1.0 / 1.1
    HttpVersionNotSupported = 505,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use static_http::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) estándar del código
    ///
    /// # Ejemplo
    /// ```
    /// use static_http::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::MethodNotAllowed.reason_phrase(), "Method Not Allowed");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        let code = self.as_u16();
        (400..500).contains(&code)
    }

    /// Verifica si el código indica error del servidor (5xx)
    pub fn is_server_error(&self) -> bool {
        let code = self.as_u16();
        (500..600).contains(&code)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
