//! Fixed-capacity counter for concurrently held resources.
//!
//! Standalone utility for capping concurrent browser-side rendering slots; the
//! HTTP server itself does not use it.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Tracks how many instances of a scarce resource are in use and refuses to
/// hand out more than `capacity` at a time.
///
/// The limiter is advisory: it does not own the resource, callers are
/// expected to [`release`](Self::release) what they acquired. Prefer
/// [`try_acquire_guard`](Self::try_acquire_guard), which releases on drop.
#[derive(Debug)]
pub struct ResourceLimiter {
    capacity: usize,
    active: AtomicUsize,
}

impl ResourceLimiter {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            active: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently held.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Claims a slot if one is free. Returns `false` when the limiter is at
    /// capacity.
    pub fn try_acquire(&self) -> bool {
        self.active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |active| {
                (active < self.capacity).then_some(active + 1)
            })
            .is_ok()
    }

    /// Returns a slot. Releasing more often than acquiring is a no-op once
    /// the count reaches zero.
    pub fn release(&self) {
        let _ = self
            .active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |active| {
                active.checked_sub(1)
            });
    }

    pub fn try_acquire_guard(&self) -> Option<ResourceLimiterGuard<'_>> {
        self.try_acquire()
            .then_some(ResourceLimiterGuard { limiter: self })
    }
}

/// Holds one slot of a [`ResourceLimiter`] until dropped.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the guard is dropped"]
pub struct ResourceLimiterGuard<'a> {
    limiter: &'a ResourceLimiter,
}

impl Drop for ResourceLimiterGuard<'_> {
    fn drop(&mut self) {
        self.limiter.release();
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn acquire_up_to_capacity() {
        let limiter = ResourceLimiter::new(2);

        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
        assert_eq!(limiter.active(), 2);

        limiter.release();
        assert_eq!(limiter.active(), 1);
        assert!(limiter.try_acquire());
    }

    #[test]
    fn zero_capacity_never_acquires() {
        let limiter = ResourceLimiter::new(0);
        assert!(!limiter.try_acquire());
        assert!(limiter.try_acquire_guard().is_none());
    }

    #[test]
    fn release_saturates_at_zero() {
        let limiter = ResourceLimiter::new(1);
        limiter.release();
        limiter.release();
        assert_eq!(limiter.active(), 0);

        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn guard_releases_on_drop() {
        let limiter = ResourceLimiter::new(1);

        let guard = limiter.try_acquire_guard();
        assert!(guard.is_some());
        assert!(limiter.try_acquire_guard().is_none());

        drop(guard);
        assert_eq!(limiter.active(), 0);
        assert!(limiter.try_acquire_guard().is_some());
    }

    #[test]
    fn instances_are_independent() {
        let a = ResourceLimiter::new(1);
        let b = ResourceLimiter::new(1);

        assert!(a.try_acquire());
        assert!(b.try_acquire());
    }

    #[test]
    fn concurrent_acquire_never_exceeds_capacity() {
        let limiter = Arc::new(ResourceLimiter::new(3));

        let acquired = (0..16)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                thread::spawn(move || limiter.try_acquire())
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|&ok| ok)
            .count();

        assert_eq!(acquired, 3);
        assert_eq!(limiter.active(), 3);
    }
}
