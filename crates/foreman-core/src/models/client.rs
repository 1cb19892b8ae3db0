//! Client model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A customer who commissions projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    /// Unique identifier for the client
    pub id: u64,

    /// Display name of the client
    pub name: String,

    /// Contact email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Timestamp when the client was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the client was last modified (UTC)
    pub updated_at: Timestamp,
}
