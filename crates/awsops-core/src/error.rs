use thiserror::Error;

/// Result type alias for awsops operations
pub type Result<T> = std::result::Result<T, OpsError>;

/// Errors that can occur while driving the AWS operations
#[derive(Error, Debug)]
pub enum OpsError {
    /// Authentication or authorization failed
    #[error("authorization failed: {message}")]
    Unauthorized {
        /// Error detail reported by AWS
        message: String,
    },

    /// Request was throttled by AWS
    #[error("request throttled by AWS during {operation}")]
    Throttled {
        /// The API operation that was throttled
        operation: &'static str,
    },

    /// No hosted zone matched the requested name
    #[error("hosted zone {zone} not found")]
    ZoneNotFound {
        /// The zone name that failed to resolve
        zone: String,
    },

    /// No instance matched the requested identifier or Name tag
    #[error("no instance found for '{name}'")]
    InstanceNotFound {
        /// The instance ID or Name tag that was searched for
        name: String,
    },

    /// More than one instance matched the Name tag
    #[error("multiple instances found with Name tag '{name}': {candidates:?}")]
    AmbiguousInstance {
        /// The Name tag that was searched for
        name: String,
        /// Every matching instance ID
        candidates: Vec<String>,
    },

    /// The CSV header row did not match the required column set
    #[error("CSV file must have these headers: env,zone,type,name,value,ttl (found: {found})")]
    BadHeader {
        /// The header row that was found, comma-joined
        found: String,
    },

    /// A TTL field failed to parse as a non-negative integer
    #[error("invalid TTL '{raw}': must be a non-negative integer")]
    InvalidTtl {
        /// The raw TTL field value
        raw: String,
    },

    /// A data row was malformed (short row, bad quoting, missing field)
    #[error("malformed row: {0}")]
    Row(String),

    /// AWS returned an error response
    #[error("AWS error ({code}): {message}")]
    Api {
        /// AWS error code (e.g. `InvalidChangeBatch`)
        code: String,
        /// Error message from AWS
        message: String,
    },

    /// The request never produced a service response
    #[error("transport failure: {0}")]
    Transport(String),

    /// A request payload could not be assembled
    #[error("failed to build request: {0}")]
    BuildRequest(String),

    /// The status-ok wait exhausted its attempt budget
    #[error("instance {instance_id} did not pass status checks within {waited} seconds")]
    WaitTimeout {
        /// The instance that was being waited on
        instance_id: String,
        /// Total seconds the wait was allowed to run
        waited: u64,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OpsError {
    /// Returns true if retrying the same call could succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Throttled { .. } | Self::Transport(_))
    }

    /// Returns true if the error is due to authentication or authorization
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns true if the error is a resolution miss rather than a call failure
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ZoneNotFound { .. } | Self::InstanceNotFound { .. })
    }
}
