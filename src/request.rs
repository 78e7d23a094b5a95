use std::collections::HashMap;
use std::sync::Arc;

use crate::attrs::{TypedAttributes, TypedKey};
use crate::session::Session;

/// Attribute holding the identity resolved by
/// [`AuthenticatedAction`](crate::security::AuthenticatedAction).
pub const IDENTITY: TypedKey<String> = TypedKey::new("identity");

/// An incoming request as seen by the action chain.
///
/// `Request` is an immutable value. Cloning is cheap because every part is
/// reference-counted, and attribute updates go through
/// [`with_attr`](Self::with_attr), which returns a new request and leaves
/// the original untouched.
///
/// # Examples
///
/// ```
/// use guarded_action::{Request, Session, IDENTITY};
///
/// let req = Request::builder("req-1")
///     .method("GET")
///     .path("/account")
///     .session(Session::from_iter([("username", "alice")]))
///     .build();
///
/// let enriched = req.with_attr(&IDENTITY, "alice".to_string());
///
/// assert_eq!(enriched.identity(), Some("alice"));
/// assert_eq!(req.identity(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    request_id: Arc<str>,
    method: Arc<str>,
    path: Arc<str>,
    headers: Arc<HashMap<String, String>>,
    session: Session,
    attrs: TypedAttributes,
}

impl Request {
    /// Starts building a request with the given request ID.
    pub fn builder(request_id: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(request_id)
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a header value. Header names are case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the session view.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the attribute store.
    pub fn attrs(&self) -> &TypedAttributes {
        &self.attrs
    }

    /// Returns the attribute stored under `key`, if any.
    pub fn attr<T>(&self, key: &TypedKey<T>) -> Option<&T>
    where
        T: Send + Sync + 'static,
    {
        self.attrs.get(key)
    }

    /// Returns a copy of this request with `key` set to `value`.
    #[must_use]
    pub fn with_attr<T>(&self, key: &TypedKey<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self {
            attrs: self.attrs.with(key, value),
            ..self.clone()
        }
    }

    /// Returns the resolved identity, if an authenticating action set one.
    pub fn identity(&self) -> Option<&str> {
        self.attr(&IDENTITY).map(String::as_str)
    }
}

/// Builder for [`Request`].
///
/// Router integrations translate their own request types into a `Request`
/// through this builder. Method defaults to `GET` and path to `/`.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request_id: String,
    method: String,
    path: String,
    headers: HashMap<String, String>,
    session: Session,
    attrs: TypedAttributes,
}

impl RequestBuilder {
    fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            method: "GET".to_string(),
            path: "/".to_string(),
            headers: HashMap::new(),
            session: Session::new(),
            attrs: TypedAttributes::new(),
        }
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Sets the request path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Adds a header. A later header with the same name replaces an earlier one.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the session view.
    pub fn session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Sets an initial attribute.
    pub fn attr<T>(mut self, key: &TypedKey<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.attrs = self.attrs.with(key, value);
        self
    }

    /// Builds the request.
    pub fn build(self) -> Request {
        Request {
            request_id: self.request_id.into(),
            method: self.method.into(),
            path: self.path.into(),
            headers: Arc::new(self.headers),
            session: self.session,
            attrs: self.attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let req = Request::builder("req-test").build();

        assert_eq!(req.request_id(), "req-test");
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "/");
        assert!(req.session().is_empty());
        assert!(req.attrs().is_empty());
    }

    #[test]
    fn headers_are_case_insensitive() {
        let req = Request::builder("req-1")
            .header("X-Api-Key", "k-1")
            .build();

        assert_eq!(req.header("x-api-key"), Some("k-1"));
        assert_eq!(req.header("X-API-KEY"), Some("k-1"));
        assert_eq!(req.header("missing"), None);
    }

    #[test]
    fn with_attr_leaves_original_untouched() {
        let req = Request::builder("req-1").build();
        let enriched = req.with_attr(&IDENTITY, "alice".to_string());

        assert_eq!(req.identity(), None);
        assert_eq!(enriched.identity(), Some("alice"));
        assert_eq!(enriched.request_id(), "req-1");
    }

    #[test]
    fn builder_attrs_are_visible() {
        const TRACE: TypedKey<u64> = TypedKey::new("trace");

        let req = Request::builder("req-2").attr(&TRACE, 42).build();

        assert_eq!(req.attr(&TRACE), Some(&42));
    }

    #[test]
    fn enriched_request_shares_session() {
        let req = Request::builder("req-3")
            .session(Session::from_iter([("username", "carol")]))
            .build();
        let enriched = req.with_attr(&IDENTITY, "carol".to_string());

        assert_eq!(enriched.session(), req.session());
    }
}
