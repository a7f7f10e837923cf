//! Response messages for the HTTP boundary.
//!
//! User-facing messages are short and sanitized; details are logged.

pub const MISSING_EVENT_PARAM: &str = "Missing 'event' query parameter";

pub const MISSING_BODY: &str = "Missing request body";

/// Content type other than `application/json` or `application/octet-stream`.
pub const INVALID_CONTENT_TYPE: &str = "Invalid Content-Type";

pub const INVALID_N_PARAM: &str = "Invalid 'n' query parameter";

pub const CONFIRMATION_REQUIRED: &str = "Confirmation required: pass confirm=true";

pub const MESSAGES_CLEARED: &str = "All messages cleared";

pub const CLEAR_FAILED: &str = "Failed to clear messages";

pub const HEALTHY: &str = "OK";

pub use crate::dispatcher::UNEXPECTED_ERROR;
