//! Error taxonomy for the crate.
//!
//! Three families of failure surface to callers:
//!
//! - transport failures ([`Error::Http`], [`Error::Status`], [`Error::Decode`])
//!   propagate unchanged from the collaborator that raised them and are never
//!   retried here;
//! - unresolvable references ([`Error::MalformedReference`]) fail loudly;
//! - [`Error::MissingAttribute`] reports an attribute that is genuinely absent
//!   from upstream after a completed detail fetch, distinct from a fetch that
//!   never succeeded.
//!
//! Unrecognized vote-type tags and party names are not errors at all; they
//! degrade gracefully (dropped vote, absent party) as upstream schema noise.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by any resource or listing operation.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request itself failed (connection, timeout, TLS).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream service answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    /// A response arrived but did not have the expected shape.
    #[error("could not decode {context}: {message}")]
    Decode {
        context: &'static str,
        message: String,
    },

    /// A member reference URL matched neither known canonical shape.
    #[error("malformed member reference: {0}")]
    MalformedReference(String),

    /// The detail fetch completed but the requested attribute does not exist
    /// on this resource (for example a Lords tally asked of a Commons
    /// division).
    #[error("{resource} has no attribute `{attribute}`")]
    MissingAttribute {
        resource: &'static str,
        attribute: &'static str,
    },

    /// The operation only exists for the House of Commons.
    #[error("{operation} are only available for the Commons")]
    CommonsOnly { operation: &'static str },

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl Error {
    /// Build a [`Error::Decode`] with a short context label naming what was
    /// being decoded.
    pub(crate) fn decode(context: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            context,
            message: message.to_string(),
        }
    }
}
