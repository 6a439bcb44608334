use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "clinicd";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address the HTTP listener binds when `CLINICD_BIND` is not set.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Get the application data directory.
/// ~/.clinicd/ by default, overridable via CLINICD_DATA_DIR.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CLINICD_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".clinicd")
}

/// Get the SQLite database path (CLINICD_DB overrides).
pub fn database_path() -> PathBuf {
    if let Ok(path) = std::env::var("CLINICD_DB") {
        return PathBuf::from(path);
    }
    data_dir().join("clinicd.db")
}

/// Get the socket address string the server should bind (CLINICD_BIND overrides).
pub fn bind_addr() -> String {
    std::env::var("CLINICD_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Default tracing filter when RUST_LOG is not set (CLINICD_LOG overrides).
pub fn default_log_filter() -> String {
    std::env::var("CLINICD_LOG").unwrap_or_else(|_| "clinicd=info".to_string())
}
