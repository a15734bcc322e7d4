use core::sync::atomic::{AtomicBool, Ordering};

/// Lock-free rendezvous between an interrupt context and the poll loop.
///
/// The producer side calls [`signal`](SampleReadyFlag::signal) from
/// interrupt context: it never blocks, never allocates and never waits on
/// anything the consumer holds. The single consumer drains the flag with
/// [`poll_and_clear`](SampleReadyFlag::poll_and_clear). Signals arriving
/// between two polls coalesce into one indication rather than queue up; the
/// consumer re-reads the latest sensor buffer on indication, so intermediate
/// samples are dropped on purpose.
#[derive(Debug, Default)]
pub struct SampleReadyFlag {
    ready: AtomicBool,
}

impl SampleReadyFlag {
    /// `const` so the flag can live in a `static` shared with the interrupt
    /// handler.
    pub const fn new() -> Self {
        SampleReadyFlag {
            ready: AtomicBool::new(false),
        }
    }

    /// Marks a new sample as pending. Safe to call concurrently with
    /// [`poll_and_clear`](SampleReadyFlag::poll_and_clear).
    pub fn signal(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Atomically takes the pending indication, if any. Must only be called
    /// from the single consumer context.
    pub fn poll_and_clear(&self) -> bool {
        self.ready.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_without_signal() {
        let flag = SampleReadyFlag::new();

        assert!(!flag.poll_and_clear());
        assert!(!flag.poll_and_clear());
    }

    #[test]
    fn test_signals_coalesce() {
        let flag = SampleReadyFlag::new();

        for _ in 0..10 {
            flag.signal();
        }

        assert!(flag.poll_and_clear());
        assert!(!flag.poll_and_clear());
    }

    #[test]
    fn test_signal_after_poll_is_seen() {
        let flag = SampleReadyFlag::new();

        flag.signal();
        assert!(flag.poll_and_clear());

        flag.signal();
        assert!(flag.poll_and_clear());
    }

    #[test]
    fn test_signal_from_other_thread() {
        use std::sync::Arc;

        let flag = Arc::new(SampleReadyFlag::new());
        let producer = flag.clone();

        let handle = std::thread::spawn(move || {
            for _ in 0..1000 {
                producer.signal();
            }
        });

        handle.join().unwrap();

        assert!(flag.poll_and_clear());
        assert!(!flag.poll_and_clear());
    }
}
