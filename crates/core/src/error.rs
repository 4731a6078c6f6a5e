/// Domain-level error taxonomy shared by every gateway.
///
/// Each variant maps to exactly one HTTP status and one stable `kind`
/// string at the API boundary (see [`CoreError::kind`]).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The caller omitted a required input field.
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    /// The caller omitted the identifier of the record to fetch.
    #[error("Missing record identifier")]
    MissingIdentifier,

    /// No bearer token, or the identity service did not accept it.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// No record matched, or the store failed while looking it up.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A provider call or the parsing of its reply failed.
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    /// An outbound call exceeded its deadline.
    #[error("Upstream call to {service} timed out")]
    Timeout { service: &'static str },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stable machine-readable kind used in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::MissingInput(_) => "missing_input",
            CoreError::MissingIdentifier => "missing_identifier",
            CoreError::Unauthenticated(_) => "unauthenticated",
            CoreError::NotFound { .. } => "not_found",
            CoreError::UpstreamFailure(_) => "upstream_failure",
            CoreError::Timeout { .. } => "timeout",
            CoreError::Internal(_) => "internal",
        }
    }
}
