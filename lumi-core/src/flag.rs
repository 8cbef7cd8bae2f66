//! Signals shared between the sampling and indicator tasks.
//!
//! Both are level signals backed by an [`AtomicBool`], so they only rely on
//! atomic loads and stores (available on thumbv6m). Waiters park on a waker
//! registration instead of spinning.

use core::{
    cell::RefCell,
    future::poll_fn,
    sync::atomic::{AtomicBool, Ordering},
    task::Poll,
};

use embassy_sync::{
    blocking_mutex::{Mutex, raw::CriticalSectionRawMutex},
    waitqueue::MultiWakerRegistration,
};

/// Tasks that may wait on one latch at the same time.
const MAX_WAITERS: usize = 4;

struct Latch {
    raised: AtomicBool,
    wakers: Mutex<CriticalSectionRawMutex, RefCell<MultiWakerRegistration<MAX_WAITERS>>>,
}

impl Latch {
    const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
            wakers: Mutex::new(RefCell::new(MultiWakerRegistration::new())),
        }
    }

    fn raise(&self) {
        self.raised.store(true, Ordering::Release);
        self.wakers.lock(|wakers| wakers.borrow_mut().wake());
    }

    fn lower(&self) {
        self.raised.store(false, Ordering::Release);
    }

    fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    async fn wait(&self) {
        poll_fn(|cx| {
            if self.is_raised() {
                return Poll::Ready(());
            }

            self.wakers
                .lock(|wakers| wakers.borrow_mut().register(cx.waker()));

            // Raised between the first check and the registration.
            if self.is_raised() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }
}

/// Tells the indicator that a sample cycle completed.
///
/// Set by the sampling task, cleared by the indicator task once its pulse is
/// over. Level semantics: setting an already set flag does nothing, so cycles
/// completing faster than the indicator pulses are coalesced into one pulse.
pub struct CompletionFlag {
    latch: Latch,
}

impl CompletionFlag {
    pub const fn new() -> Self {
        Self {
            latch: Latch::new(),
        }
    }

    /// Mark a cycle as completed and wake the indicator. Never blocks.
    #[inline]
    pub fn set(&self) {
        self.latch.raise();
    }

    #[inline]
    pub fn clear(&self) {
        self.latch.lower();
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.latch.is_raised()
    }

    /// Resolve once the flag is set. Does not clear it.
    pub async fn wait(&self) {
        self.latch.wait().await
    }
}

impl Default for CompletionFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Cooperative stop request observed by both task loops.
///
/// Once requested it stays requested.
pub struct Shutdown {
    latch: Latch,
}

impl Shutdown {
    pub const fn new() -> Self {
        Self {
            latch: Latch::new(),
        }
    }

    #[inline]
    pub fn request(&self) {
        self.latch.raise();
    }

    #[inline]
    pub fn is_requested(&self) -> bool {
        self.latch.is_raised()
    }

    /// Resolve once a shutdown has been requested.
    pub async fn wait(&self) {
        self.latch.wait().await
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embassy_futures::{
        block_on,
        join::{join, join3},
        select::{Either, select},
        yield_now,
    };

    #[test]
    fn set_then_clear() {
        let flag = CompletionFlag::new();
        assert!(!flag.is_set());

        flag.set();
        assert!(flag.is_set());

        flag.clear();
        assert!(!flag.is_set());
    }

    #[test]
    fn double_set_needs_one_clear() {
        let flag = CompletionFlag::new();

        flag.set();
        flag.set();
        flag.clear();

        assert!(!flag.is_set());
    }

    #[test]
    fn clear_is_idempotent() {
        let flag = CompletionFlag::default();

        flag.clear();
        flag.clear();

        assert!(!flag.is_set());
    }

    #[test]
    fn wait_returns_at_once_when_set() {
        let flag = CompletionFlag::new();
        flag.set();

        block_on(flag.wait());

        assert!(flag.is_set());
    }

    #[test]
    fn wait_wakes_on_set() {
        let flag = CompletionFlag::new();

        let waiter = async {
            flag.wait().await;
            flag.is_set()
        };

        let setter = async {
            for _ in 0..3 {
                yield_now().await;
            }
            flag.set();
        };

        let (seen, ()) = block_on(join(waiter, setter));
        assert!(seen);
    }

    #[test]
    fn wait_stays_pending_while_clear() {
        let flag = CompletionFlag::new();

        let outcome = block_on(select(flag.wait(), async {
            for _ in 0..10 {
                yield_now().await;
            }
        }));

        assert!(matches!(outcome, Either::Second(())));
    }

    #[test]
    fn shutdown_wakes_every_waiter() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.is_requested());

        block_on(join3(shutdown.wait(), shutdown.wait(), async {
            yield_now().await;
            shutdown.request();
        }));

        assert!(shutdown.is_requested());
    }
}
