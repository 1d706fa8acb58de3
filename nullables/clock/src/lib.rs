use solet_core::UnixTimestamp;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

/// Wall clock in Unix seconds. The nullable variant returns a
/// configured, advanceable time so activity resolution is deterministic
/// in tests.
pub struct WallClock {
    fixed: Option<AtomicU64>,
}

impl WallClock {
    const DEFAULT_NULL_NOW: u64 = 1_700_000_000;

    pub fn new() -> Self {
        Self { fixed: None }
    }

    pub fn new_null() -> Self {
        Self::new_null_with(UnixTimestamp(Self::DEFAULT_NULL_NOW))
    }

    pub fn new_null_with(now: UnixTimestamp) -> Self {
        Self {
            fixed: Some(AtomicU64::new(now.as_secs())),
        }
    }

    pub fn now(&self) -> UnixTimestamp {
        match &self.fixed {
            Some(fixed) => UnixTimestamp(fixed.load(Ordering::SeqCst)),
            None => {
                let elapsed = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default();
                UnixTimestamp(elapsed.as_secs())
            }
        }
    }

    /// Advances a null clock. No effect on a real clock.
    pub fn advance_secs(&self, secs: u64) {
        if let Some(fixed) = &self.fixed {
            fixed.fetch_add(secs, Ordering::SeqCst);
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}
