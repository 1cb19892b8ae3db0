//! Error handling utilities for the MCP server

use foreman_core::TrackerError;
use rmcp::ErrorData;

/// Convert a tracker error into an MCP error.
///
/// Problems with the request itself (unknown IDs, invalid values) are
/// reported as invalid parameters so the caller can correct them; everything
/// else is an internal error.
pub fn to_mcp_error(message: &str, error: &TrackerError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_not_found() || matches!(error, TrackerError::InvalidInput { .. }) {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}

/// Error for a lookup that found nothing.
pub fn not_found(kind: &str, id: u64) -> ErrorData {
    ErrorData::invalid_params(format!("{kind} with ID {id} not found"), None)
}
