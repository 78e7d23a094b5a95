use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ResolutionError;

use super::{AuthConfig, IdentityResolver, ResolverFactory, ResolverRef, SessionIdentity};

type Provider = Arc<dyn Fn() -> Arc<dyn IdentityResolver> + Send + Sync>;

#[derive(Clone)]
enum Binding {
    Instance(Arc<dyn IdentityResolver>),
    Provider(Provider),
}

/// Wiring-time registry mapping resolver references to resolvers.
///
/// A registry is built once, then shared (usually behind an `Arc`) by every
/// authenticating action that resolves through it. It cannot be modified
/// after it is handed out.
///
/// Two kinds of bindings are supported:
/// - instances, shared by every invocation;
/// - providers, called once per invocation for per-request resolvers.
///
/// # Examples
///
/// ```
/// use guarded_action::security::{AuthConfig, ResolverFactory, ResolverRef, ResolverRegistry};
///
/// let registry = ResolverRegistry::with_defaults();
///
/// assert!(registry.resolve(&AuthConfig::default()).is_ok());
/// assert!(registry.resolve(&AuthConfig::new(ResolverRef::named("oauth"))).is_err());
/// ```
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    bindings: HashMap<ResolverRef, Binding>,
}

impl ResolverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with [`SessionIdentity`] bound under its type.
    pub fn with_defaults() -> Self {
        Self::new().register(SessionIdentity::new())
    }

    /// Binds `resolver` under `ResolverRef::of::<R>()`.
    pub fn register<R>(self, resolver: R) -> Self
    where
        R: IdentityResolver + 'static,
    {
        self.register_as(ResolverRef::of::<R>(), Arc::new(resolver))
    }

    /// Binds a shared instance under `reference`, replacing any earlier binding.
    pub fn register_as(mut self, reference: ResolverRef, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.bindings.insert(reference, Binding::Instance(resolver));
        self
    }

    /// Binds a provider under `reference`; it is called on every resolution.
    pub fn register_provider<F>(mut self, reference: ResolverRef, provider: F) -> Self
    where
        F: Fn() -> Arc<dyn IdentityResolver> + Send + Sync + 'static,
    {
        self.bindings
            .insert(reference, Binding::Provider(Arc::new(provider)));
        self
    }

    /// Returns true if something is bound under `reference`.
    pub fn contains(&self, reference: ResolverRef) -> bool {
        self.bindings.contains_key(&reference)
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl ResolverFactory for ResolverRegistry {
    fn resolve(&self, config: &AuthConfig) -> Result<Arc<dyn IdentityResolver>, ResolutionError> {
        match self.bindings.get(&config.resolver()) {
            Some(Binding::Instance(resolver)) => Ok(Arc::clone(resolver)),
            Some(Binding::Provider(provider)) => Ok(provider()),
            None => Err(ResolutionError::Unregistered(config.resolver())),
        }
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed;
    impl IdentityResolver for Fixed {}

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = ResolverRegistry::new();

        assert!(registry.is_empty());
        assert_eq!(
            registry.resolve(&AuthConfig::default()).err(),
            Some(ResolutionError::Unregistered(ResolverRef::of::<SessionIdentity>()))
        );
    }

    #[test]
    fn defaults_bind_session_identity() {
        let registry = ResolverRegistry::with_defaults();

        assert!(registry.contains(ResolverRef::of::<SessionIdentity>()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn instances_are_shared() {
        let registry = ResolverRegistry::new().register(Fixed);
        let config = AuthConfig::of::<Fixed>();

        let a = registry.resolve(&config).unwrap();
        let b = registry.resolve(&config).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn providers_run_per_resolution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = ResolverRegistry::new().register_provider(ResolverRef::named("scoped"), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(Fixed) as Arc<dyn IdentityResolver>
        });
        let config = AuthConfig::new(ResolverRef::named("scoped"));

        let a = registry.resolve(&config).unwrap();
        let b = registry.resolve(&config).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn later_binding_replaces_earlier() {
        let first: Arc<dyn IdentityResolver> = Arc::new(Fixed);
        let second: Arc<dyn IdentityResolver> = Arc::new(Fixed);
        let reference = ResolverRef::named("r");

        let registry = ResolverRegistry::new()
            .register_as(reference, Arc::clone(&first))
            .register_as(reference, Arc::clone(&second));
        let resolved = registry.resolve(&AuthConfig::new(reference)).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&resolved, &second));
    }
}
