//! Shared utilities for use cases.
//!
//! Contains cancellable waiting helpers and lock access used across the
//! salon orchestrator, the discovery cache and the latent link scanner.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Sleep for `duration` unless cancelled first.
///
/// Returns `false` if the token fired before the delay elapsed.
pub(crate) async fn pause(duration: Duration, token: &CancellationToken) -> bool {
    if token.is_cancelled() {
        return false;
    }
    if duration.is_zero() {
        return true;
    }
    tokio::select! {
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

/// Await `future` unless cancelled first.
///
/// Returns `None` if the token fired; the pending future is dropped.
pub(crate) async fn cancellable<F: Future>(future: F, token: &CancellationToken) -> Option<F::Output> {
    if token.is_cancelled() {
        return None;
    }
    tokio::select! {
        _ = token.cancelled() => None,
        output = future => Some(output),
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pause_completes() {
        let token = CancellationToken::new();
        assert!(pause(Duration::from_secs(5), &token).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_interrupted_by_cancel() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });
        assert!(!pause(Duration::from_secs(60), &token).await);
    }

    #[tokio::test]
    async fn test_cancellable_skips_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(cancellable(async { 7 }, &token).await, None);
        assert!(!pause(Duration::ZERO, &token).await);
    }

    #[tokio::test]
    async fn test_cancellable_returns_output() {
        let token = CancellationToken::new();
        assert_eq!(cancellable(async { 7 }, &token).await, Some(7));
    }
}
