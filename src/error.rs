use thiserror::Error;

/// Error taxonomy for the resolution library.
///
/// Validation errors (`MissingInput`, `WrongShape`) are raised synchronously,
/// before any network call, and distinguish "the caller forgot to pass it"
/// from "the source data is malformed". Transport and decode errors propagate
/// unmodified from the underlying client. A failed search that simply finds
/// no acceptable candidate is NOT an error; it is `Ok(None)` at the call site.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field or argument is absent.
    #[error("missing required input `{0}`")]
    MissingInput(&'static str),

    /// A required field is present but has the wrong semantic type.
    #[error("input `{0}` has the wrong shape: expected {1}")]
    WrongShape(&'static str, &'static str),

    /// The token exchange completed at the transport level but returned no
    /// usable access token. Fatal to the renewal chain.
    #[error("token exchange returned no usable access token")]
    CredentialExchange,

    /// HTTP transport failure from a collaborator service.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A collaborator response body could not be decoded.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}
