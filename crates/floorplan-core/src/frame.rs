//! Render-request coalescing and resize debouncing.

use kurbo::Size;

#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};

/// Coalesces repaint requests into at most one per frame.
#[derive(Debug, Clone, Default)]
pub struct RenderScheduler {
    requested: bool,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) {
        self.requested = true;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Consume the pending request. Returns true at most once per batch of requests.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}

/// Holds back resize events until the size has been stable for a fixed delay.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(Size, Instant)>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Record a new size, restarting the delay.
    pub fn push(&mut self, size: Size, now: Instant) {
        self.pending = Some((size, now + self.delay));
    }

    /// The latest size once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Size> {
        match self.pending {
            Some((size, deadline)) if now >= deadline => {
                self.pending = None;
                Some(size)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce() {
        let mut scheduler = RenderScheduler::new();
        scheduler.request();
        scheduler.request();
        scheduler.request();
        assert!(scheduler.take());
        assert!(!scheduler.take());
    }

    #[test]
    fn test_resize_waits_for_delay() {
        let mut debouncer = ResizeDebouncer::from_millis(100);
        let t0 = Instant::now();
        debouncer.push(Size::new(1024.0, 768.0), t0);
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(50)), None);
        assert_eq!(
            debouncer.poll(t0 + Duration::from_millis(100)),
            Some(Size::new(1024.0, 768.0))
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_new_push_restarts_delay() {
        let mut debouncer = ResizeDebouncer::from_millis(100);
        let t0 = Instant::now();
        debouncer.push(Size::new(800.0, 600.0), t0);
        debouncer.push(Size::new(900.0, 700.0), t0 + Duration::from_millis(80));
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(120)), None);
        assert_eq!(
            debouncer.poll(t0 + Duration::from_millis(180)),
            Some(Size::new(900.0, 700.0))
        );
    }
}
