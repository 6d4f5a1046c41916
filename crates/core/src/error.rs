#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Failures talking to (or understanding) the upstream video provider.
///
/// None of these abort a request cycle: the router turns each one into an
/// informational notice shown in place of the results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Network failure, timeout, or non-success HTTP status.
    #[error("{0}")]
    Transport(String),

    /// The payload could not be decoded or its top-level shape is wrong.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// A required credential is missing; no request was attempted.
    #[error("{0}")]
    NotConfigured(String),
}
