// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Retry-until-predicate-or-timeout primitives backing every waiter.

use crate::error::{BuilderError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, sleep_until, timeout_at, Instant};

/// Paces attempts at a fixed interval until an overall deadline.
///
/// The first [`Poller::tick`] returns immediately. Each later tick sleeps one
/// interval, unless that would cross the deadline, in which case it sleeps
/// until the deadline and fails with [`BuilderError::DeadlineExceeded`].
#[derive(Debug)]
pub struct Poller {
    interval: Duration,
    deadline: Instant,
    started: bool,
}

impl Poller {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Poller {
            interval,
            deadline: Instant::now() + timeout,
            started: false,
        }
    }

    /// Wait until the next attempt is due
    pub async fn tick(&mut self) -> Result<()> {
        if !self.started {
            self.started = true;
            return Ok(());
        }

        let next = Instant::now() + self.interval;
        if next >= self.deadline {
            sleep_until(self.deadline).await;
            return Err(BuilderError::DeadlineExceeded);
        }

        sleep(self.interval).await;
        Ok(())
    }

    /// Run one attempt, cut short when the overall deadline passes
    pub async fn bounded<F: Future>(&self, attempt: F) -> Result<F::Output> {
        timeout_at(self.deadline, attempt)
            .await
            .map_err(|_| BuilderError::DeadlineExceeded)
    }
}

/// Poll `condition` every `interval` until it reports done or `timeout` passes.
///
/// `Ok(true)` ends the wait successfully, `Ok(false)` polls again and an
/// error ends the wait with that error. Callers that want to ride out
/// transient read failures map them to `Ok(false)` inside the condition.
pub async fn poll_until<F, Fut>(
    interval: Duration,
    timeout: Duration,
    mut condition: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let mut poller = Poller::new(interval, timeout);

    loop {
        poller.tick().await?;

        if poller.bounded(condition()).await?? {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_attempt_is_immediate() {
        let started = std::time::Instant::now();

        poll_until(Duration::from_secs(10), Duration::from_secs(30), || async { Ok(true) })
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_polls_until_done() {
        let attempts = Arc::new(AtomicUsize::new(0));

        let counter = attempts.clone();
        poll_until(Duration::from_millis(10), Duration::from_secs(5), move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) >= 2) }
        })
        .await
        .unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_condition_error_stops_polling() {
        let attempts = Arc::new(AtomicUsize::new(0));

        let counter = attempts.clone();
        let err = poll_until(Duration::from_millis(10), Duration::from_secs(5), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<bool, _>(BuilderError::Invalid("broken predicate".to_string()))
            }
        })
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "broken predicate");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_returns_deadline_exceeded() {
        let started = std::time::Instant::now();

        let err = poll_until(Duration::from_millis(20), Duration::from_millis(150), || async {
            Ok(false)
        })
        .await
        .unwrap_err();

        assert!(matches!(err, BuilderError::DeadlineExceeded));
        assert!(err.to_string().contains("deadline exceeded"));
        assert!(started.elapsed() >= Duration::from_millis(150));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_slow_attempt_is_cut_at_deadline() {
        let started = std::time::Instant::now();

        let err = poll_until(Duration::from_millis(10), Duration::from_millis(100), || async {
            sleep(Duration::from_secs(30)).await;
            Ok(true)
        })
        .await
        .unwrap_err();

        assert!(matches!(err, BuilderError::DeadlineExceeded));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
