//! Per-session request serialization.
//!
//! tower-sessions loads the session record on first access and writes it back
//! after the handler returns. Two requests carrying the same session cookie
//! would otherwise both load the same cart and the later save would drop the
//! earlier change. This layer sits outside the session layer and holds a
//! per-session lock for the whole request, so each shopper's requests run
//! one after another while different shoppers still run in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use tokio::sync::OwnedMutexGuard;

use super::session::SESSION_COOKIE_NAME;

/// Registry of per-session locks.
///
/// Entries are held weakly, so a lock disappears once no request is using it.
#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    inner: Arc<Mutex<HashMap<String, Weak<tokio::sync::Mutex<()>>>>>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of `session_id`.
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(lock) = locks.get(session_id).and_then(Weak::upgrade) {
                lock
            } else {
                locks.retain(|_, weak| weak.strong_count() > 0);
                let lock = Arc::new(tokio::sync::Mutex::new(()));
                locks.insert(session_id.to_string(), Arc::downgrade(&lock));
                lock
            }
        };
        lock.lock_owned().await
    }

    /// Number of sessions with a live lock.
    #[must_use]
    pub fn active(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

/// Session id from the request's cookies, if the shopper has one yet.
fn session_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Run requests for the same session one at a time.
///
/// Requests without a session cookie start a fresh session and need no lock.
/// Static assets never touch the session.
pub async fn session_lock_middleware(
    State(locks): State<SessionLocks>,
    request: Request,
    next: Next,
) -> Response {
    let Some(session_id) = session_cookie(&request) else {
        return next.run(request).await;
    };
    if request.uri().path().starts_with("/static/") {
        return next.run(request).await;
    }

    let _guard = locks.acquire(&session_id).await;
    next.run(request).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::{Router, body::Body, http::Request as HttpRequest, middleware, routing::get};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_same_session_waits() {
        let locks = SessionLocks::new();
        let first = locks.acquire("abc").await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire("abc").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(first);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_other_sessions_do_not_wait() {
        let locks = SessionLocks::new();
        let _held = locks.acquire("abc").await;

        tokio::time::timeout(Duration::from_secs(1), locks.acquire("xyz"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_released_locks_are_dropped() {
        let locks = SessionLocks::new();
        {
            let _a = locks.acquire("a").await;
            let _b = locks.acquire("b").await;
            assert_eq!(locks.active(), 2);
        }
        assert_eq!(locks.active(), 0);
    }

    #[test]
    fn test_session_cookie_parsing() {
        let request = HttpRequest::get("/")
            .header(COOKIE, format!("theme=dark; {SESSION_COOKIE_NAME}=s3ss10n"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(session_cookie(&request).as_deref(), Some("s3ss10n"));

        let request = HttpRequest::get("/")
            .header(COOKIE, "theme=dark")
            .body(Body::empty())
            .unwrap();
        assert_eq!(session_cookie(&request), None);
    }

    #[tokio::test]
    async fn test_middleware_serializes_same_cookie() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let overlapped = Arc::new(AtomicUsize::new(0));

        let handler = {
            let in_flight = in_flight.clone();
            let overlapped = overlapped.clone();
            move || {
                let in_flight = in_flight.clone();
                let overlapped = overlapped.clone();
                async move {
                    if in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
                        overlapped.fetch_add(1, Ordering::SeqCst);
                    }
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    "ok"
                }
            }
        };

        let app = Router::new().route("/", get(handler)).layer(
            middleware::from_fn_with_state(SessionLocks::new(), session_lock_middleware),
        );

        let requests = (0..5).map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                app.oneshot(
                    HttpRequest::get("/")
                        .header(COOKIE, format!("{SESSION_COOKIE_NAME}=same"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap()
            })
        });
        for request in requests.collect::<Vec<_>>() {
            request.await.unwrap();
        }

        assert_eq!(overlapped.load(Ordering::SeqCst), 0);
    }
}
