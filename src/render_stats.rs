//! Render statistics tracking for debugging and performance analysis.
//!
//! Enable render stats by compiling with the `render-stats` feature:
//! ```bash
//! cargo test --features render-stats
//! ```
//!
//! Stats are printed at most once per second from [`end_draw`], showing:
//! - Draw calls and slots drawn, clipped and skipped
//! - Blend state changes
//! - Scratch buffer growth

/// Snapshot of accumulated render statistics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub draws: u64,
    pub slots_drawn: u64,
    pub slots_clipped: u64,
    pub slots_skipped: u64,
    pub blend_changes: u64,
    pub scratch_growths: u64,
}

#[cfg(feature = "render-stats")]
mod inner {
    use std::cell::RefCell;
    use std::time::Instant;

    thread_local! {
        static STATS: RefCell<RenderStats> = RefCell::new(RenderStats::new());
    }

    struct RenderStats {
        draws: u64,
        // Slots
        slots_drawn: u64,
        slots_clipped: u64,
        slots_skipped: u64,
        // GPU state
        blend_changes: u64,
        scratch_growths: u64,
        // Timing
        last_print: Instant,
    }

    impl RenderStats {
        fn new() -> Self {
            Self {
                draws: 0,
                slots_drawn: 0,
                slots_clipped: 0,
                slots_skipped: 0,
                blend_changes: 0,
                scratch_growths: 0,
                last_print: Instant::now(),
            }
        }

        fn reset(&mut self) {
            *self = Self::new();
        }
    }

    /// Record a slot emitted directly to the batcher.
    #[inline]
    pub fn record_slot_drawn() {
        STATS.with(|s| {
            s.borrow_mut().slots_drawn += 1;
        });
    }

    /// Record a slot routed through the clipper.
    #[inline]
    pub fn record_slot_clipped() {
        STATS.with(|s| {
            s.borrow_mut().slots_clipped += 1;
        });
    }

    /// Record a slot that produced no geometry.
    #[inline]
    pub fn record_slot_skipped() {
        STATS.with(|s| {
            s.borrow_mut().slots_skipped += 1;
        });
    }

    #[inline]
    pub fn record_blend_change() {
        STATS.with(|s| {
            s.borrow_mut().blend_changes += 1;
        });
    }

    #[inline]
    pub fn record_scratch_growth() {
        STATS.with(|s| {
            s.borrow_mut().scratch_growths += 1;
        });
    }

    /// Return a snapshot of the current stats (for testing).
    pub fn get_stats() -> super::StatsSnapshot {
        STATS.with(|s| {
            let stats = s.borrow();
            super::StatsSnapshot {
                draws: stats.draws,
                slots_drawn: stats.slots_drawn,
                slots_clipped: stats.slots_clipped,
                slots_skipped: stats.slots_skipped,
                blend_changes: stats.blend_changes,
                scratch_growths: stats.scratch_growths,
            }
        })
    }

    /// Reset all stats to zero (for test isolation).
    pub fn reset_stats() {
        STATS.with(|s| {
            s.borrow_mut().reset();
        });
    }

    /// Called at the end of each skeleton draw to potentially print stats.
    pub fn end_draw() {
        STATS.with(|s| {
            let mut stats = s.borrow_mut();
            stats.draws += 1;

            if stats.last_print.elapsed().as_secs() >= 1 {
                let slots_total = stats.slots_drawn + stats.slots_clipped + stats.slots_skipped;
                let clip_rate = if slots_total > 0 {
                    (stats.slots_clipped as f64 / slots_total as f64) * 100.0
                } else {
                    0.0
                };

                eprintln!("[Render Stats] draws={}", stats.draws);
                eprintln!(
                    "  slots: total={} drawn={} clipped={} skipped={} clip_rate={:.1}%",
                    slots_total,
                    stats.slots_drawn,
                    stats.slots_clipped,
                    stats.slots_skipped,
                    clip_rate
                );
                eprintln!(
                    "  state: blend_changes={} scratch_growths={}",
                    stats.blend_changes, stats.scratch_growths
                );

                stats.reset();
            }
        });
    }
}

#[cfg(feature = "render-stats")]
pub use inner::*;

// No-op implementations when feature is disabled - these get completely inlined away

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn get_stats() -> StatsSnapshot {
    StatsSnapshot::default()
}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn reset_stats() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_slot_drawn() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_slot_clipped() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_slot_skipped() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_blend_change() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn record_scratch_growth() {}

#[cfg(not(feature = "render-stats"))]
#[inline(always)]
pub fn end_draw() {}
