//! Authentication for action chains.
//!
//! This module provides:
//! - `IdentityResolver`: pluggable strategy extracting an identity from a request
//! - `SessionIdentity`: the default strategy, reading the session's `"username"`
//! - `ResolverFactory` / `ResolverRegistry`: wiring-time lookup of declared resolvers
//! - `AuthenticatedAction`: decorator that continues the chain with the
//!   identity attached, or short-circuits with the resolver's rejection
//!
//! Requests without an identity are not errors. They end in a rejection
//! response produced by the resolver; only unexpected faults surface as
//! `ActionError`.

mod authenticated;
mod factory;
mod registry;
mod resolver;

pub use authenticated::{AuthConfig, AuthenticatedAction};
pub use factory::{ResolverFactory, ResolverStrategy};
pub use registry::ResolverRegistry;
pub use resolver::{IdentityResolver, ResolverRef, SessionIdentity, SESSION_USERNAME};
