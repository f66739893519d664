//! Timed Holder Module
//!
//! A single-slot cell whose content expires a fixed time after it was set.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

// == Timed Holder ==
/// Holds one value for at most `ttl` after it was last set.
///
/// The value and its expiry share one lock, so readers always see a
/// consistent pair and check-then-act sequences run atomically.
#[derive(Debug)]
pub struct TimedHolder<V> {
    /// Time to live applied on every set
    ttl: Duration,
    slot: Mutex<Slot<V>>,
}

#[derive(Debug)]
struct Slot<V> {
    value: Option<V>,
    /// Instant after which the value is stale, None = beyond the clock's range
    expiry: Option<Instant>,
}

impl<V> Slot<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expiry.is_some_and(|expiry| now > expiry)
    }

    fn refresh(&mut self, now: Instant, ttl: Duration) {
        self.expiry = now.checked_add(ttl);
    }

    /// Drops the value if it has gone stale.
    fn purge(&mut self, now: Instant) {
        if self.is_expired(now) {
            self.value = None;
        }
    }
}

impl<V: Clone> TimedHolder<V> {
    // == Constructors ==
    /// Creates an empty holder.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(Slot {
                value: None,
                expiry: Some(Instant::now()),
            }),
        }
    }

    /// Creates a holder storing `value`, expiring `ttl` from now.
    pub fn with_content(ttl: Duration, value: V) -> Self {
        let holder = Self::new(ttl);
        holder.set_content(Some(value));
        holder
    }

    // == Set Content ==
    /// Stores `content` and restarts the expiry clock.
    ///
    /// Storing `None` is a no-op: the current value and expiry are kept.
    pub fn set_content(&self, content: Option<V>) {
        let Some(value) = content else {
            return;
        };
        let mut slot = self.slot.lock();
        slot.value = Some(value);
        slot.refresh(Instant::now(), self.ttl);
    }

    // == Content ==
    /// Returns the value, or None once it has expired.
    ///
    /// An expired value is dropped the first time it is observed.
    pub fn content(&self) -> Option<V> {
        let mut slot = self.slot.lock();
        slot.purge(Instant::now());
        slot.value.clone()
    }

    // == Touch ==
    /// Returns the value and restarts its expiry clock, or None if expired.
    pub fn touch(&self) -> Option<V> {
        let mut slot = self.slot.lock();
        let now = Instant::now();
        slot.purge(now);
        let value = slot.value.clone()?;
        slot.refresh(now, self.ttl);
        Some(value)
    }

    /// Returns the value if it is still live, without dropping a stale one.
    pub fn peek(&self) -> Option<V> {
        let slot = self.slot.lock();
        if slot.is_expired(Instant::now()) {
            return None;
        }
        slot.value.clone()
    }

    // == Time To Live ==
    /// Remaining life of the held value.
    ///
    /// # Returns
    /// - `None` if the holder is empty
    /// - `Some(Duration::ZERO)` once the value has expired
    /// - `Some(Duration::MAX)` if the expiry lies beyond the clock's range
    pub fn ttl_remaining(&self) -> Option<Duration> {
        let slot = self.slot.lock();
        slot.value.as_ref()?;
        Some(match slot.expiry {
            Some(expiry) => expiry.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const LONG_TTL: Duration = Duration::from_secs(10);

    fn stale_holder(value: &str) -> TimedHolder<String> {
        let past = Instant::now()
            .checked_sub(Duration::from_millis(10))
            .expect("monotonic clock too close to its origin");
        TimedHolder {
            ttl: LONG_TTL,
            slot: Mutex::new(Slot {
                value: Some(value.to_string()),
                expiry: Some(past),
            }),
        }
    }

    #[test]
    fn test_holder_content() {
        let holder = TimedHolder::with_content(LONG_TTL, "the content".to_string());
        assert_eq!(holder.content(), Some("the content".to_string()));

        holder.set_content(Some("a llama".to_string()));
        assert_eq!(holder.content(), Some("a llama".to_string()));
    }

    #[test]
    fn test_holder_expires() {
        let holder = TimedHolder::with_content(Duration::from_millis(10), "the content");

        sleep(Duration::from_millis(50));

        assert_eq!(holder.content(), None);
    }

    #[test]
    fn test_holder_new_is_empty() {
        let holder: TimedHolder<String> = TimedHolder::new(LONG_TTL);

        assert_eq!(holder.content(), None);
        assert_eq!(holder.touch(), None);
        assert_eq!(holder.ttl_remaining(), None);
        assert_eq!(holder.ttl(), LONG_TTL);
    }

    #[test]
    fn test_holder_set_none_is_noop() {
        let holder = TimedHolder::with_content(LONG_TTL, "kept".to_string());

        holder.set_content(None);

        assert_eq!(holder.content(), Some("kept".to_string()));
    }

    #[test]
    fn test_holder_stale_value_is_dropped() {
        let holder = stale_holder("gone");

        // peek reports absence but leaves the value in place
        assert_eq!(holder.peek(), None);
        assert!(holder.slot.lock().value.is_some());

        assert_eq!(holder.content(), None);
        assert!(holder.slot.lock().value.is_none());
    }

    #[test]
    fn test_holder_touch_stale_value() {
        let holder = stale_holder("gone");

        assert_eq!(holder.touch(), None);
        assert!(holder.slot.lock().value.is_none());
    }

    #[test]
    fn test_holder_set_revives_stale_holder() {
        let holder = stale_holder("gone");

        holder.set_content(Some("back".to_string()));

        assert_eq!(holder.content(), Some("back".to_string()));
    }

    #[test]
    fn test_holder_touch_extends_expiry() {
        let holder = TimedHolder::with_content(Duration::from_millis(100), 7u32);

        sleep(Duration::from_millis(60));
        assert_eq!(holder.touch(), Some(7));

        // 120ms after the set, but only 60ms after the touch
        sleep(Duration::from_millis(60));
        assert_eq!(holder.content(), Some(7));
    }

    #[test]
    fn test_holder_touch_waits_for_lock_then_sees_expiry() {
        let holder = std::sync::Arc::new(TimedHolder::with_content(
            Duration::from_millis(20),
            "brief".to_string(),
        ));

        let slot = holder.slot.lock();
        let toucher = {
            let holder = std::sync::Arc::clone(&holder);
            std::thread::spawn(move || holder.touch())
        };

        // the value goes stale while the toucher is blocked on the slot
        sleep(Duration::from_millis(60));
        drop(slot);

        assert_eq!(toucher.join().unwrap(), None);
        assert_eq!(holder.content(), None);
    }

    #[test]
    fn test_holder_ttl_remaining() {
        let holder = TimedHolder::with_content(LONG_TTL, 1u8);

        let remaining = holder.ttl_remaining().unwrap();
        assert!(remaining <= LONG_TTL);
        assert!(remaining >= LONG_TTL - Duration::from_secs(1));

        assert_eq!(stale_holder("x").ttl_remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_holder_huge_ttl_never_expires() {
        let holder = TimedHolder::with_content(Duration::MAX, "forever");

        assert_eq!(holder.content(), Some("forever"));
        assert_eq!(holder.ttl_remaining(), Some(Duration::MAX));
    }
}
