//! Composable request actions.
//!
//! An [`Action`] turns a [`Request`] into a pending [`Response`]. Actions are
//! either terminal (a handler that always produces the response itself) or
//! decorators that hold a delegate and add behavior around its invocation.
//! Chains are built once at wiring time with [`ActionChain`] and never
//! change afterwards.
//!
//! # Flow
//!
//! ```text
//! router ──invoke──▶ outer decorator ──invoke──▶ … ──invoke──▶ handler
//!        ◀─response─                 ◀─response─     ◀─response─
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::error::ActionError;
use crate::request::Request;
use crate::response::Response;

/// The pending result of an action invocation.
pub type ActionFuture = BoxFuture<'static, Result<Response, ActionError>>;

/// A unit of request handling.
///
/// # Dyn Compatibility
///
/// `invoke` returns a boxed future instead of being an `async fn` so chains
/// can be assembled from `Arc<dyn Action>` links.
///
/// # Cancellation
///
/// Dropping the returned future cancels the invocation. Decorators await
/// their delegate inside their own future, so cancellation reaches every
/// link that is still running.
pub trait Action: Send + Sync {
    /// Handles `request`.
    ///
    /// Implementations should defer their work into the returned future;
    /// callers must not assume anything has happened before it is polled.
    fn invoke(&self, request: Request) -> ActionFuture;
}

impl<A: Action + ?Sized> Action for Arc<A> {
    fn invoke(&self, request: Request) -> ActionFuture {
        (**self).invoke(request)
    }
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn invoke(&self, request: Request) -> ActionFuture {
        (**self).invoke(request)
    }
}

/// A terminal action backed by an async function.
///
/// Created with [`handler_fn`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> std::fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

/// Wraps an async function as a terminal [`Action`].
///
/// # Examples
///
/// ```
/// use guarded_action::{handler_fn, Action, Request, Response};
///
/// let hello = handler_fn(|req: Request| async move {
///     Ok(Response::ok(format!("hello from {}", req.path())))
/// });
///
/// let response = futures::executor::block_on(hello.invoke(Request::builder("r").build()))
///     .unwrap();
/// assert_eq!(response.body(), "hello from /");
/// ```
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, ActionError>> + Send + 'static,
{
    HandlerFn { f }
}

impl<F, Fut> Action for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, ActionError>> + Send + 'static,
{
    fn invoke(&self, request: Request) -> ActionFuture {
        (self.f)(request).boxed()
    }
}

/// Wiring-time builder for a chain of actions.
///
/// The chain starts from its innermost action; each [`wrap`](Self::wrap)
/// puts a new decorator around everything added so far, so the last
/// decorator added is the first one invoked.
///
/// # Examples
///
/// ```
/// use guarded_action::{handler_fn, Action, ActionChain, Request, Response, Session};
/// use guarded_action::security::AuthenticatedAction;
///
/// let chain = ActionChain::new(handler_fn(|req: Request| async move {
///     Ok(Response::ok(format!("hi {}", req.identity().unwrap_or("?"))))
/// }))
/// .wrap(AuthenticatedAction::session)
/// .build();
///
/// let req = Request::builder("r-1")
///     .session(Session::from_iter([("username", "alice")]))
///     .build();
/// let response = futures::executor::block_on(chain.invoke(req)).unwrap();
/// assert_eq!(response.body(), "hi alice");
/// ```
#[derive(Clone)]
pub struct ActionChain {
    head: Arc<dyn Action>,
}

impl ActionChain {
    /// Starts a chain from its innermost action.
    pub fn new(action: impl Action + 'static) -> Self {
        Self {
            head: Arc::new(action),
        }
    }

    /// Wraps the chain built so far in a decorator.
    pub fn wrap<D, F>(self, decorate: F) -> Self
    where
        F: FnOnce(Arc<dyn Action>) -> D,
        D: Action + 'static,
    {
        Self {
            head: Arc::new(decorate(self.head)),
        }
    }

    /// Wraps the chain in a decorator whose construction may fail.
    ///
    /// # Errors
    ///
    /// Returns the decorator's construction error unchanged.
    pub fn try_wrap<D, E, F>(self, decorate: F) -> Result<Self, E>
    where
        F: FnOnce(Arc<dyn Action>) -> Result<D, E>,
        D: Action + 'static,
    {
        Ok(Self {
            head: Arc::new(decorate(self.head)?),
        })
    }

    /// Finishes wiring and returns the outermost action.
    pub fn build(self) -> Arc<dyn Action> {
        self.head
    }
}

impl std::fmt::Debug for ActionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionChain").finish_non_exhaustive()
    }
}
