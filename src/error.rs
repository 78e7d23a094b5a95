use std::error::Error as StdError;

use thiserror::Error;

use crate::security::ResolverRef;

/// Boxed error type carried by faults raised outside this crate.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors surfaced by invoking an action.
///
/// A missing identity is not an error: it produces a rejection
/// [`Response`](crate::Response). Everything here is a fault the
/// surrounding framework must translate (typically into a 500).
#[derive(Debug, Error)]
pub enum ActionError {
    /// The configured identity resolver could not be obtained.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// An identity resolver failed while resolving or rejecting.
    #[error("identity resolver `{resolver}` failed: {fault}")]
    Resolver {
        /// The resolver that raised the fault
        resolver: ResolverRef,
        /// The fault, unchanged
        #[source]
        fault: ResolverFault,
    },

    /// A handler further down the chain failed.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),
}

impl ActionError {
    /// Wraps an arbitrary handler error.
    pub fn handler(err: impl Into<BoxError>) -> Self {
        ActionError::Handler(err.into())
    }
}

/// A declared resolver reference could not be turned into a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Nothing is registered under the reference.
    #[error("no identity resolver registered for `{0}`")]
    Unregistered(ResolverRef),
}

/// An unexpected failure inside an identity resolver.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResolverFault {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ResolverFault {
    /// Creates a fault with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a fault caused by `source`.
    pub fn caused_by(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the fault message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
