//! Allocation-site and evaluation-tick tracking for diagnostic builds.
//!
//! Only compiled with the `provenance` feature. Every `Cell::reset` stamps
//! the caller's source location and the current tick, so a fatal error can
//! report where and when the offending cell was written.

use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};

static TICK: AtomicU64 = AtomicU64::new(0);

/// Where and when a cell was last reset.
#[derive(Copy, Clone, Debug)]
pub struct Provenance {
    pub site: &'static Location<'static>,
    pub tick: u64,
}

impl Provenance {
    #[track_caller]
    pub fn here() -> Self {
        Provenance {
            site: Location::caller(),
            tick: current_tick(),
        }
    }
}

/// Advance the evaluation tick (one per path step).
pub fn bump_tick() -> u64 {
    TICK.fetch_add(1, Ordering::Relaxed) + 1
}

pub fn current_tick() -> u64 {
    TICK.load(Ordering::Relaxed)
}
