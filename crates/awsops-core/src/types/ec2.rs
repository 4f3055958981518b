use serde::{Deserialize, Serialize};
use std::fmt;

/// EC2 instance lifecycle states as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceState {
    /// Instance is starting up
    Pending,
    /// Instance is running
    Running,
    /// Instance is being terminated
    ShuttingDown,
    /// Instance is stopping
    Stopping,
    /// Instance is stopped
    Stopped,
    /// Instance has been terminated
    Terminated,
    /// A state name this tool does not recognize
    Unknown,
}

impl InstanceState {
    /// Parse a provider state name. Unrecognized names map to [`Self::Unknown`]
    /// rather than failing, since the provider may grow states this tool has not
    /// seen.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "shutting-down" => Self::ShuttingDown,
            "stopping" => Self::Stopping,
            "stopped" => Self::Stopped,
            "terminated" => Self::Terminated,
            _ => Self::Unknown,
        }
    }

    /// The state name as the provider spells it
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::ShuttingDown => "shutting-down",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Terminated => "terminated",
            Self::Unknown => "unknown",
        }
    }

    /// States the instance locator considers at all. Anything on its way
    /// out (terminated, shutting-down) is excluded from tag matches.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Running | Self::Stopping | Self::Stopped
        )
    }

    /// States in which a reboot request is expected to behave. Anything
    /// else draws a warning; the provider stays the final arbiter.
    #[must_use]
    pub const fn is_rebootable(&self) -> bool {
        matches!(self, Self::Running | Self::Stopping | Self::Stopped)
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instance as described by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSummary {
    /// Provider-assigned instance ID
    pub instance_id: String,

    /// Current lifecycle state
    pub state: InstanceState,

    /// Value of the Name tag, if the instance carries one
    pub name_tag: Option<String>,
}

/// Receipt for an issued reboot request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebootReceipt {
    /// API request ID, used for audit-log lookup guidance
    pub request_id: Option<String>,
}
