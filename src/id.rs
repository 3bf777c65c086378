//! ID generation utilities for credpoll
//!
//! Provides identifiers for operations and correlation tokens.

use uuid::Uuid;

/// Generate a unique operation ID
///
/// Format: `op-{uuid_v4}`
pub fn generate_operation_id() -> String {
    format!("op-{}", Uuid::new_v4())
}

/// Generate a correlation token for disambiguating concurrent operations
///
/// Format: 32 lowercase hex chars. Short enough to fit in a card "number" field.
pub fn generate_correlation_token() -> String {
    Uuid::new_v4().simple().to_string()
}
