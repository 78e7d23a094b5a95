//! Read-only session view attached to a request.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A read-only string mapping supplied by the session transport.
///
/// The session is decoded outside this crate (cookie, token, store lookup);
/// requests only ever read from it. Cloning is cheap.
///
/// Values are hidden from `Debug` output; only keys are shown.
///
/// # Examples
///
/// ```
/// use guarded_action::Session;
///
/// let session = Session::from_iter([("username", "alice")]);
/// assert_eq!(session.get("username"), Some("alice"));
/// assert_eq!(session.get("missing"), None);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    data: Arc<HashMap<String, String>>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the session has no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<HashMap<String, String>> for Session {
    fn from(data: HashMap<String, String>) -> Self {
        Self {
            data: Arc::new(data),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Session
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<HashMap<_, _>>()
            .into()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("keys", &self.data.keys().collect::<Vec<_>>())
            .finish()
    }
}
