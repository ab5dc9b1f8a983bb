//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse UUID from string
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}

/// Whether `s` is a well-formed UUID in any of the accepted textual forms
pub fn is_valid(s: &str) -> bool {
    parse(s).is_ok()
}
