//! # Resolución de Paths
//! src/files/mod.rs
//!
//! Traduce el path de la URL (ya decodificado) a un path dentro del
//! static root.
//!
//! ```text
//! /              → <root>/index.html
//! /css/main.css  → <root>/css/main.css
//! /../secret     → <root>/../secret   (sin normalizar)
//! ```
//!
//! `resolve_path` no normaliza los segmentos `..`; la contención se
//! verifica aparte con `is_within_root`.

use std::path::{Component, Path, PathBuf};

/// Archivo servido cuando se pide `/`
pub const INDEX_FILE: &str = "/index.html";

/// Une el path de la URL al static root
///
/// # Ejemplo
/// ```
/// use static_http::files::resolve_path;
/// use std::path::Path;
///
/// let root = Path::new("/srv/static");
/// assert_eq!(resolve_path(root, "/"), Path::new("/srv/static/index.html"));
/// assert_eq!(resolve_path(root, "/img/logo.png"), Path::new("/srv/static/img/logo.png"));
/// ```
pub fn resolve_path(root: &Path, url_path: &str) -> PathBuf {
    let url_path = if url_path == "/" { INDEX_FILE } else { url_path };
    root.join(url_path.trim_start_matches('/'))
}

/// Indica si `path` queda dentro de `root` tras aplicar los `..`
///
/// Es una verificación léxica: no toca el filesystem ni sigue symlinks.
pub fn is_within_root(root: &Path, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };

    let mut depth = 0usize;
    for component in relative.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}
