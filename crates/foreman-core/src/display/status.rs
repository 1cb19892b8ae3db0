//! Confirmation messages for operations without a resource to show.

use std::fmt;

/// Outcome line for operations such as swapping steps.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Swapped steps 1 and 2");
        assert_eq!(success.to_string(), "Success: Swapped steps 1 and 2\n");

        let failure = OperationStatus::failure("Step 3 not found");
        assert_eq!(failure.to_string(), "Error: Step 3 not found\n");
    }
}
