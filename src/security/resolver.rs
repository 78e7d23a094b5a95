use std::fmt;
use std::sync::Arc;

use crate::error::ResolverFault;
use crate::request::Request;
use crate::response::{DefaultResponses, Response, ResponseFactory};

/// Session key read by the default identity strategy.
pub const SESSION_USERNAME: &str = "username";

/// A declared reference to an identity resolver.
///
/// This is what wiring code writes down when it asks for authentication
/// ("use the resolver registered as X"). A [`ResolverFactory`](super::ResolverFactory)
/// turns it into a concrete instance.
///
/// # Examples
///
/// ```
/// use guarded_action::security::{ResolverRef, SessionIdentity};
///
/// let by_type = ResolverRef::of::<SessionIdentity>();
/// let by_name = ResolverRef::named("api-key");
///
/// assert_ne!(by_type, by_name);
/// assert_eq!(by_name.to_string(), "api-key");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolverRef(&'static str);

impl ResolverRef {
    /// A reference identified by an explicit name.
    pub const fn named(name: &'static str) -> Self {
        Self(name)
    }

    /// A reference identified by the resolver's type.
    pub fn of<R: ?Sized + 'static>() -> Self {
        Self(std::any::type_name::<R>())
    }

    /// Returns the reference name.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ResolverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Strategy for extracting an identity from a request.
///
/// Resolvers are shared across concurrent invocations, so implementations
/// must be stateless or synchronize internally. They only read the request.
///
/// Both methods have defaults: [`identity`](Self::identity) reads the
/// session's `"username"` entry and [`on_rejected`](Self::on_rejected)
/// answers with the built-in `401 Unauthorized`.
///
/// # Errors
///
/// Returning `Err` signals an unexpected fault (a backend being down, a
/// malformed token store). A request that simply has no identity is
/// `Ok(None)`.
///
/// # Examples
///
/// ```
/// use guarded_action::security::IdentityResolver;
/// use guarded_action::{Request, ResolverFault};
///
/// /// Trusts an upstream proxy header.
/// struct ForwardedUser;
///
/// impl IdentityResolver for ForwardedUser {
///     fn identity(&self, request: &Request) -> Result<Option<String>, ResolverFault> {
///         Ok(request.header("x-forwarded-user").map(str::to_owned))
///     }
/// }
///
/// let req = Request::builder("r").header("X-Forwarded-User", "svc").build();
/// assert_eq!(ForwardedUser.identity(&req).unwrap().as_deref(), Some("svc"));
/// ```
pub trait IdentityResolver: Send + Sync {
    /// Returns the identity carried by `request`, if any.
    fn identity(&self, request: &Request) -> Result<Option<String>, ResolverFault> {
        Ok(request
            .session()
            .get(SESSION_USERNAME)
            .map(str::to_owned))
    }

    /// Returns the response sent when `request` has no identity.
    fn on_rejected(&self, request: &Request) -> Result<Response, ResolverFault> {
        Ok(DefaultResponses.unauthorized(request))
    }
}

/// The default identity strategy: session `"username"`, rendered rejection.
///
/// The rejection response comes from a [`ResponseFactory`], so applications
/// can plug in their own "not authorized" page without writing a resolver.
#[derive(Clone)]
pub struct SessionIdentity {
    responses: Arc<dyn ResponseFactory>,
}

impl SessionIdentity {
    /// Creates the strategy with the built-in rejection response.
    pub fn new() -> Self {
        Self::with_responses(DefaultResponses)
    }

    /// Creates the strategy with a custom rejection renderer.
    pub fn with_responses(responses: impl ResponseFactory + 'static) -> Self {
        Self {
            responses: Arc::new(responses),
        }
    }
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionIdentity").finish_non_exhaustive()
    }
}

impl IdentityResolver for SessionIdentity {
    fn on_rejected(&self, request: &Request) -> Result<Response, ResolverFault> {
        Ok(self.responses.unauthorized(request))
    }
}
