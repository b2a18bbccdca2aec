//! Interval polling bound to a component's lifetime.
//!
//! A poll loop holds a [`LifetimeToken`]; the owning component cancels it in
//! `on_cleanup`. Responses that arrive after cancellation are dropped instead
//! of being written into disposed signals.

use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct LifetimeToken {
    cancelled: Arc<AtomicBool>,
}

impl LifetimeToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_alive(&self) -> bool {
        !self.cancelled.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

fn deliver<T, A>(token: &LifetimeToken, result: Result<T, String>, apply: &A) -> Step
where
    A: Fn(T),
{
    if !token.is_alive() {
        return Step::Stop;
    }
    match result {
        Ok(value) => apply(value),
        Err(e) => log::warn!("poll failed: {}", e),
    }
    Step::Continue
}

/// Runs `fetch` every `interval_ms` and hands successful results to `apply`
/// until `token` is cancelled. Failed fetches are logged and retried on the
/// next tick.
pub fn spawn_polling<T, F, Fut, A>(interval_ms: u32, token: LifetimeToken, fetch: F, apply: A)
where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
    A: Fn(T) + 'static,
{
    spawn_local(async move {
        loop {
            TimeoutFuture::new(interval_ms).await;
            if !token.is_alive() {
                break;
            }
            let result = fetch().await;
            if deliver(&token, result, &apply) == Step::Stop {
                break;
            }
        }
        log::debug!("polling stopped");
    });
}
