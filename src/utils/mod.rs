//! Shared utilities for ID generation and URL handling.

pub mod short_id;
pub mod url_validator;
