//! What a cascade may do with a manually assigned project status.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::ProjectStatus;

/// Policy applied when a cascade reaches a project whose stored status is
/// one the derivation never produces (currently only `cancelled`).
///
/// Manual values that derivation can produce are always overwritten by the
/// next cascade, under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManualStatusPolicy {
    /// Terminal project statuses survive cascades. Only an explicit refresh
    /// re-derives them.
    #[default]
    PreserveTerminal,

    /// Cascades overwrite every stored status.
    AlwaysDerive,
}

impl ManualStatusPolicy {
    /// Whether a cascade may replace `current` with a derived value.
    pub fn allows_overwrite(&self, current: ProjectStatus) -> bool {
        match self {
            ManualStatusPolicy::PreserveTerminal => !current.is_terminal(),
            ManualStatusPolicy::AlwaysDerive => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ManualStatusPolicy::PreserveTerminal => "preserve-terminal",
            ManualStatusPolicy::AlwaysDerive => "always-derive",
        }
    }
}

impl fmt::Display for ManualStatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManualStatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "preserve-terminal" => Ok(ManualStatusPolicy::PreserveTerminal),
            "always-derive" => Ok(ManualStatusPolicy::AlwaysDerive),
            _ => Err(format!("Invalid manual status policy: {s}")),
        }
    }
}
