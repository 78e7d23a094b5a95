//! Property tests for the authenticating decorator.
//!
//! These tests check branch selection, pass-through, and request
//! immutability across generated sessions and resolvers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use guarded_action::security::{AuthenticatedAction, IdentityResolver, SessionIdentity};
use guarded_action::{
    handler_fn, Action, Request, ResolverFault, Response, Session, TypedAttributes, TypedKey,
    IDENTITY,
};
use proptest::prelude::*;

fn arb_username() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_.-]{0,15}").unwrap()
}

/// Sessions with arbitrary entries, some of which may be `username`.
fn arb_session() -> impl Strategy<Value = Session> {
    (
        prop::option::of(arb_username()),
        prop::collection::hash_map("[a-z]{1,8}", "[ -~]{0,12}", 0..4),
    )
        .prop_map(|(username, mut extra)| {
            extra.remove("username");
            if let Some(name) = username {
                extra.insert("username".to_string(), name);
            }
            Session::from(extra)
        })
}

/// Terminal action that answers with a body derived from the identity.
fn delegate(calls: &Arc<AtomicUsize>) -> Arc<dyn Action> {
    let calls = Arc::clone(calls);
    Arc::new(handler_fn(move |req: Request| {
        let calls = Arc::clone(&calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Response::ok(format!("hello {}", req.identity().unwrap_or(""))))
        }
    }))
}

fn request(session: Session) -> Request {
    Request::builder("req-prop").path("/p").session(session).build()
}

/// Session resolver with a different rejection page.
struct PoliteSession;

impl IdentityResolver for PoliteSession {
    fn on_rejected(&self, _request: &Request) -> Result<Response, ResolverFault> {
        Ok(Response::unauthorized("please sign in"))
    }
}

proptest! {
    /// Property: the delegate runs exactly when the session has a username,
    /// and its result comes back unchanged.
    #[test]
    fn proptest_branch_follows_session_username(session in arb_session()) {
        let calls = Arc::new(AtomicUsize::new(0));
        let action = AuthenticatedAction::session(delegate(&calls));
        let username = session.get("username").map(str::to_owned);

        let response = tokio_test::block_on(action.invoke(request(session))).unwrap();

        match username {
            Some(name) => {
                prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
                prop_assert_eq!(response, Response::ok(format!("hello {}", name)));
            }
            None => {
                prop_assert_eq!(calls.load(Ordering::SeqCst), 0);
                let expected = SessionIdentity::new()
                    .on_rejected(&request(Session::new()))
                    .unwrap();
                prop_assert_eq!(response, expected);
            }
        }
    }

    /// Property: the caller's request never gains the identity attribute.
    #[test]
    fn proptest_original_request_is_never_mutated(session in arb_session()) {
        let calls = Arc::new(AtomicUsize::new(0));
        let action = AuthenticatedAction::session(delegate(&calls));
        let original = request(session);

        let _ = tokio_test::block_on(action.invoke(original.clone())).unwrap();

        prop_assert!(original.identity().is_none());
        prop_assert!(original.attrs().is_empty());
    }

    /// Property: swapping in a resolver with the same identity outcome never
    /// changes whether the delegate runs.
    #[test]
    fn proptest_resolvers_are_substitutable(session in arb_session()) {
        let default_calls = Arc::new(AtomicUsize::new(0));
        let polite_calls = Arc::new(AtomicUsize::new(0));
        let default_action = AuthenticatedAction::session(delegate(&default_calls));
        let polite_action = AuthenticatedAction::direct(PoliteSession, delegate(&polite_calls));

        let a = tokio_test::block_on(default_action.invoke(request(session.clone()))).unwrap();
        let b = tokio_test::block_on(polite_action.invoke(request(session.clone()))).unwrap();

        prop_assert_eq!(
            default_calls.load(Ordering::SeqCst),
            polite_calls.load(Ordering::SeqCst)
        );
        if session.contains_key("username") {
            prop_assert_eq!(a, b);
        } else {
            prop_assert_eq!(b.body(), "please sign in");
        }
    }

    /// Property: repeated invocations with the same request take the same branch.
    #[test]
    fn proptest_classification_is_idempotent(session in arb_session(), repeats in 2usize..5) {
        let calls = Arc::new(AtomicUsize::new(0));
        let action = AuthenticatedAction::session(delegate(&calls));
        let req = request(session);

        let first = tokio_test::block_on(action.invoke(req.clone())).unwrap();
        for _ in 1..repeats {
            let again = tokio_test::block_on(action.invoke(req.clone())).unwrap();
            prop_assert_eq!(&again, &first);
        }

        let expected_calls = if req.session().contains_key("username") { repeats } else { 0 };
        prop_assert_eq!(calls.load(Ordering::SeqCst), expected_calls);
    }

    /// Property: attribute stores keep earlier keys and never alias.
    #[test]
    fn proptest_attribute_stores_compose_independently(
        first in arb_username(),
        second in arb_username(),
        count in any::<u32>(),
    ) {
        const COUNT: TypedKey<u32> = TypedKey::new("count");

        let base = TypedAttributes::new().with(&COUNT, count);
        let left = base.with(&IDENTITY, first.clone());
        let right = base.with(&IDENTITY, second.clone());
        let overwritten = left.with(&IDENTITY, second.clone());

        prop_assert_eq!(base.get(&IDENTITY), None);
        prop_assert_eq!(left.get(&IDENTITY), Some(&first));
        prop_assert_eq!(right.get(&IDENTITY), Some(&second));
        prop_assert_eq!(overwritten.get(&IDENTITY), Some(&second));
        prop_assert_eq!(overwritten.get(&COUNT), Some(&count));
        prop_assert_eq!(left.len(), 2);
    }
}
