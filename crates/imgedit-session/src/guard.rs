//! Single in-flight request flag

use std::sync::atomic::{AtomicBool, Ordering};

/// Holds the session's in-flight flag until dropped
///
/// Dropping the guard, including when the owning future is abandoned,
/// clears the flag.
#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    /// Take the flag, or `None` if another request holds it
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusive_until_dropped() {
        let flag = AtomicBool::new(false);

        let guard = InFlightGuard::acquire(&flag).unwrap();
        assert!(flag.load(Ordering::Acquire));
        assert!(InFlightGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(InFlightGuard::acquire(&flag).is_some());
    }
}
