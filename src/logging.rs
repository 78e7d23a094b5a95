use std::fmt;

use crate::request::Request;

/// Request-scoped structured logger.
///
/// Every event carries the request ID, method, and path of the request it
/// was created for. Session values and identities are never attached
/// automatically; callers decide what goes into the message.
#[derive(Debug, Clone, Copy)]
pub struct RequestLog<'a> {
    request: &'a Request,
}

impl<'a> RequestLog<'a> {
    /// Creates a logger bound to `request`.
    pub fn new(request: &'a Request) -> Self {
        Self { request }
    }

    /// Returns the request ID attached to every event.
    pub fn request_id(&self) -> &str {
        self.request.request_id()
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(
            request_id = %self.request.request_id(),
            method = %self.request.method(),
            path = %self.request.path(),
            "{}",
            args
        );
    }

    /// Logs an info-level message.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(
            request_id = %self.request.request_id(),
            method = %self.request.method(),
            path = %self.request.path(),
            "{}",
            args
        );
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(
            request_id = %self.request.request_id(),
            method = %self.request.method(),
            path = %self.request.path(),
            "{}",
            args
        );
    }
}
