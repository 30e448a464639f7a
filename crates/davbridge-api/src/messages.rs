//! User-facing messages of the HTTP contract.
//!
//! Existing clients match on these strings; do not translate them.

pub const MISSING_DIRECTORY: &str = "Brak nazwy katalogu";
pub const MISSING_FILE: &str = "Brak pliku w żądaniu.";
pub const MISSING_PATH: &str = "Brak ścieżki pliku";
pub const DIRECTORY_EXISTS: &str = "Katalog już istnieje na OD.";
pub const FILE_SAVED: &str = "Plik zapisany";
pub const UNKNOWN_ENDPOINT: &str = "Endpoint nie istnieje";
pub const INVALID_TOKEN: &str = "Invalid token";
