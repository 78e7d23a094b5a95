use std::sync::Arc;

use crate::action::{Action, ActionFuture};
use crate::error::{ActionError, ResolutionError, ResolverFault};
use crate::logging::RequestLog;
use crate::request::{Request, IDENTITY};

use super::{IdentityResolver, ResolverFactory, ResolverRef, ResolverStrategy, SessionIdentity};

/// Declared configuration of an authenticating action.
///
/// Names the resolver the action should use; defaults to [`SessionIdentity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthConfig {
    resolver: ResolverRef,
}

impl AuthConfig {
    /// Configuration declaring `resolver`.
    pub const fn new(resolver: ResolverRef) -> Self {
        Self { resolver }
    }

    /// Configuration declaring the resolver type `R`.
    pub fn of<R: ?Sized + 'static>() -> Self {
        Self::new(ResolverRef::of::<R>())
    }

    /// Returns the declared resolver reference.
    pub const fn resolver(&self) -> ResolverRef {
        self.resolver
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::of::<SessionIdentity>()
    }
}

/// Decorator that only lets requests with an identity through.
///
/// On every invocation the action obtains its [`IdentityResolver`], asks it
/// for the request's identity and then takes exactly one of two paths:
///
/// - **Resolved**: the identity is stored under [`IDENTITY`] on a copy of
///   the request, the delegate is invoked with that copy, and its result is
///   returned unchanged.
/// - **Rejected**: the resolver's [`on_rejected`](IdentityResolver::on_rejected)
///   response is returned and the delegate is never invoked.
///
/// The caller's request is never modified. Resolver faults and resolution
/// failures are returned as [`ActionError`] without any recovery.
///
/// # Construction
///
/// - [`direct`](Self::direct) / [`session`](Self::session): a fixed resolver
///   instance used for every invocation.
/// - [`resolved`](Self::resolved): a [`ResolverFactory`] consulted on every
///   invocation. The declared reference is checked once at construction so
///   misconfiguration fails during wiring.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use guarded_action::{handler_fn, Action, Request, Response, Status};
/// use guarded_action::security::AuthenticatedAction;
///
/// let inbox = handler_fn(|req: Request| async move {
///     Ok(Response::ok(format!("inbox of {}", req.identity().unwrap_or_default())))
/// });
/// let guarded = AuthenticatedAction::session(Arc::new(inbox));
///
/// let anonymous = Request::builder("r-1").path("/inbox").build();
/// let response = futures::executor::block_on(guarded.invoke(anonymous)).unwrap();
/// assert_eq!(response.status(), Status::UNAUTHORIZED);
/// ```
pub struct AuthenticatedAction {
    config: AuthConfig,
    strategy: ResolverStrategy,
    delegate: Arc<dyn Action>,
}

impl AuthenticatedAction {
    /// Creates the action from an explicit strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if `strategy` cannot produce the resolver
    /// `config` declares.
    pub fn new(
        config: AuthConfig,
        strategy: ResolverStrategy,
        delegate: Arc<dyn Action>,
    ) -> Result<Self, ResolutionError> {
        // Fail at wiring time, not on the first request.
        strategy.resolve(&config)?;
        Ok(Self {
            config,
            strategy,
            delegate,
        })
    }

    /// Guards `delegate` with a fixed resolver instance.
    pub fn direct<R>(resolver: R, delegate: Arc<dyn Action>) -> Self
    where
        R: IdentityResolver + 'static,
    {
        Self {
            config: AuthConfig::of::<R>(),
            strategy: ResolverStrategy::fixed(resolver),
            delegate,
        }
    }

    /// Guards `delegate` with the default session strategy.
    pub fn session(delegate: Arc<dyn Action>) -> Self {
        Self::direct(SessionIdentity::new(), delegate)
    }

    /// Guards `delegate` with the resolver `factory` returns for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if `factory` cannot satisfy `config`.
    pub fn resolved(
        config: AuthConfig,
        factory: Arc<dyn ResolverFactory>,
        delegate: Arc<dyn Action>,
    ) -> Result<Self, ResolutionError> {
        Self::new(config, ResolverStrategy::Factory(factory), delegate)
    }

    /// Returns the declared configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Returns the wrapped action.
    pub fn delegate(&self) -> &Arc<dyn Action> {
        &self.delegate
    }
}

impl std::fmt::Debug for AuthenticatedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedAction")
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

impl Action for AuthenticatedAction {
    fn invoke(&self, request: Request) -> ActionFuture {
        let config = self.config;
        let strategy = self.strategy.clone();
        let delegate = Arc::clone(&self.delegate);

        Box::pin(async move {
            let resolver = strategy.resolve(&config)?;
            let fault = |fault: ResolverFault| ActionError::Resolver {
                resolver: config.resolver(),
                fault,
            };
            let log = RequestLog::new(&request);

            match resolver.identity(&request).map_err(fault)? {
                Some(identity) => {
                    log.debug(format_args!("identity resolved by `{}`", config.resolver()));
                    let enriched = request.with_attr(&IDENTITY, identity);
                    delegate.invoke(enriched).await
                }
                None => {
                    log.debug(format_args!(
                        "no identity from `{}`, rejecting",
                        config.resolver()
                    ));
                    resolver.on_rejected(&request).map_err(fault)
                }
            }
        })
    }
}
