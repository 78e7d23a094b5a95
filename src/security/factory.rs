use std::fmt;
use std::sync::Arc;

use crate::error::ResolutionError;

use super::{AuthConfig, IdentityResolver};

/// Turns a declared resolver reference into a resolver instance.
///
/// This is the seam a dependency-injection container plugs into. Closures of
/// the right shape implement it, and so does
/// [`ResolverRegistry`](super::ResolverRegistry).
///
/// # Errors
///
/// Implementations return [`ResolutionError`] when the reference cannot be
/// satisfied. Callers never fall back to a default resolver.
pub trait ResolverFactory: Send + Sync {
    /// Returns the resolver `config` declares.
    fn resolve(&self, config: &AuthConfig) -> Result<Arc<dyn IdentityResolver>, ResolutionError>;
}

impl<F> ResolverFactory for F
where
    F: Fn(&AuthConfig) -> Result<Arc<dyn IdentityResolver>, ResolutionError> + Send + Sync,
{
    fn resolve(&self, config: &AuthConfig) -> Result<Arc<dyn IdentityResolver>, ResolutionError> {
        self(config)
    }
}

/// How an authenticating action obtains its resolver.
#[derive(Clone)]
pub enum ResolverStrategy {
    /// The same instance for every invocation.
    Fixed(Arc<dyn IdentityResolver>),
    /// Looked up through a factory on every invocation.
    Factory(Arc<dyn ResolverFactory>),
}

impl ResolverStrategy {
    /// A fixed resolver instance.
    pub fn fixed(resolver: impl IdentityResolver + 'static) -> Self {
        ResolverStrategy::Fixed(Arc::new(resolver))
    }

    /// Resolution through `factory`.
    pub fn factory(factory: impl ResolverFactory + 'static) -> Self {
        ResolverStrategy::Factory(Arc::new(factory))
    }

    /// Obtains the resolver for `config`.
    ///
    /// # Errors
    ///
    /// Returns the factory's [`ResolutionError`]. Fixed strategies never fail.
    pub fn resolve(&self, config: &AuthConfig) -> Result<Arc<dyn IdentityResolver>, ResolutionError> {
        match self {
            ResolverStrategy::Fixed(resolver) => Ok(Arc::clone(resolver)),
            ResolverStrategy::Factory(factory) => factory.resolve(config),
        }
    }
}

impl fmt::Debug for ResolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverStrategy::Fixed(_) => f.write_str("Fixed(..)"),
            ResolverStrategy::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}
