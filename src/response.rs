//! Response descriptors and the response factory capability.

use std::fmt;

use crate::request::Request;

/// An HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(u16);

impl Status {
    /// 200 OK
    pub const OK: Status = Status(200);
    /// 401 Unauthorized
    pub const UNAUTHORIZED: Status = Status(401);
    /// 403 Forbidden
    pub const FORBIDDEN: Status = Status(403);
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: Status = Status(500);

    /// Creates a status from its numeric code.
    pub const fn from_code(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    pub const fn code(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outcome of invoking an action.
///
/// A `Response` is created once and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    body: String,
}

impl Response {
    /// Creates a response with the given status and body.
    pub fn new(status: Status, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `200 OK` with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(Status::OK, body)
    }

    /// `401 Unauthorized` with the given body.
    pub fn unauthorized(body: impl Into<String>) -> Self {
        Self::new(Status::UNAUTHORIZED, body)
    }

    /// `403 Forbidden` with the given body.
    pub fn forbidden(body: impl Into<String>) -> Self {
        Self::new(Status::FORBIDDEN, body)
    }

    /// Returns the status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Produces the responses identity resolvers hand back on rejection.
///
/// Rendering lives outside this crate; implementations wrap whatever view
/// layer the application uses.
pub trait ResponseFactory: Send + Sync {
    /// Renders the "not authorized" response for `request`.
    fn unauthorized(&self, request: &Request) -> Response;
}

/// Body of the built-in "not authorized" response.
pub const UNAUTHORIZED_BODY: &str = "Unauthorized";

/// The built-in response factory: a plain `401 Unauthorized`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResponses;

impl ResponseFactory for DefaultResponses {
    fn unauthorized(&self, _request: &Request) -> Response {
        Response::unauthorized(UNAUTHORIZED_BODY)
    }
}
