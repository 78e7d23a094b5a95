//! Composable async request actions with pluggable identity resolution.
//!
//! This crate provides the request-handling core a router plugs into:
//! - **Actions**: units of request handling returning a pending response,
//!   composed into decorator chains at wiring time
//! - **Typed attributes**: immutable, type-safe per-request data
//! - **Authentication**: a decorator that resolves an identity through a
//!   pluggable strategy and either continues the chain or rejects
//!
//! # Core Types
//!
//! - [`Request`]: immutable request value with a [`Session`] and [`TypedAttributes`]
//! - [`Action`]: async unit of request handling; [`handler_fn`] builds terminal ones
//! - [`ActionChain`]: wiring-time builder for decorator chains
//! - [`security::AuthenticatedAction`]: the authenticating decorator
//! - [`security::IdentityResolver`]: identity strategy capability
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use guarded_action::{handler_fn, Action, ActionChain, Request, Response, Session, Status};
//! use guarded_action::security::{AuthConfig, AuthenticatedAction, ResolverFactory, ResolverRegistry};
//!
//! let registry: Arc<dyn ResolverFactory> = Arc::new(ResolverRegistry::with_defaults());
//!
//! let profile = ActionChain::new(handler_fn(|req: Request| async move {
//!     Ok(Response::ok(format!("profile of {}", req.identity().unwrap_or_default())))
//! }))
//! .try_wrap(|next| AuthenticatedAction::resolved(AuthConfig::default(), registry, next))
//! .expect("session resolver is registered")
//! .build();
//!
//! let signed_in = Request::builder("req-1")
//!     .session(Session::from_iter([("username", "alice")]))
//!     .build();
//! let anonymous = Request::builder("req-2").build();
//!
//! futures::executor::block_on(async {
//!     let ok = profile.invoke(signed_in).await.unwrap();
//!     assert_eq!(ok.body(), "profile of alice");
//!
//!     let rejected = profile.invoke(anonymous).await.unwrap();
//!     assert_eq!(rejected.status(), Status::UNAUTHORIZED);
//! });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod attrs;
mod error;
mod logging;
mod request;
mod response;
pub mod security;
mod session;

pub use action::{handler_fn, Action, ActionChain, ActionFuture, HandlerFn};
pub use attrs::{TypedAttributes, TypedKey};
pub use error::{ActionError, BoxError, ResolutionError, ResolverFault};
pub use logging::RequestLog;
pub use request::{Request, RequestBuilder, IDENTITY};
pub use response::{DefaultResponses, Response, ResponseFactory, Status, UNAUTHORIZED_BODY};
pub use session::Session;
