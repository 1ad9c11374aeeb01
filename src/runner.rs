//! Frame pacing
//!
//! One simulation tick per rendered frame. The driver calls `step` once per
//! frame, presents, then sleeps whatever is left of the frame period. A slow
//! frame simply runs late; ticks are never batched or skipped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::Result;
use crate::sim::{SimState, TickInput, TickReport, tick};

/// Shared flag raised by the driver (window close, Ctrl-C handler, tests)
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of one `Stepper::step` call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutcome {
    /// Report of the tick run this frame
    pub report: Option<TickReport>,
    /// Stop signal observed; no tick was run
    pub stopped: bool,
}

#[derive(Debug)]
pub struct Stepper {
    period: Duration,
    frames: u64,
    stop: StopSignal,
}

impl Stepper {
    pub fn new(tick_rate: f64, stop: StopSignal) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / tick_rate),
            frames: 0,
            stop,
        }
    }

    /// Target frame period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Frames stepped so far (one tick each)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    /// Run this frame's tick, unless the stop signal is up
    pub fn step(&mut self, state: &mut SimState, input: &TickInput) -> Result<StepOutcome> {
        if self.stop.is_raised() {
            return Ok(StepOutcome {
                report: None,
                stopped: true,
            });
        }
        let report = tick(state, input)?;
        self.frames += 1;
        Ok(StepOutcome {
            report: Some(report),
            stopped: false,
        })
    }

    /// Sleep needed after a frame that took `spent` to hold the tick rate
    pub fn remaining(&self, spent: Duration) -> Duration {
        let remaining = self.period.saturating_sub(spent);
        if remaining.is_zero() && spent > self.period {
            log::debug!(
                "Frame {} overran its period by {:?}",
                self.frames,
                spent - self.period
            );
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{PointerEvent, PointerTracker};
    use crate::settings::SimConfig;
    use glam::DVec2;

    fn state() -> SimState {
        SimState::new(SimConfig {
            initial_particles: 8,
            seed: 5,
            ..SimConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_one_tick_per_frame() {
        let mut state = state();
        let mut stepper = Stepper::new(60.0, StopSignal::new());
        for frame in 1..=5 {
            let out = stepper.step(&mut state, &TickInput::default()).unwrap();
            assert_eq!(out.report.map(|r| r.tick), Some(frame));
            assert!(!out.stopped);
        }
        assert_eq!(stepper.frames(), 5);
        assert_eq!(state.time_ticks, 5);
    }

    #[test]
    fn test_every_pressed_frame_spawns() {
        let mut state = state();
        let mut stepper = Stepper::new(60.0, StopSignal::new());
        let mut tracker = PointerTracker::new();
        tracker.handle(PointerEvent::Moved(DVec2::new(100.0, 100.0)));
        tracker.handle(PointerEvent::Pressed);

        let mut spawned = Vec::new();
        for i in 0..3 {
            tracker.handle(PointerEvent::Moved(DVec2::new(100.0 + i as f64, 100.0)));
            let input = TickInput {
                spawn: tracker.end_frame(),
            };
            let out = stepper.step(&mut state, &input).unwrap();
            spawned.extend(out.report.and_then(|r| r.spawned));
        }
        tracker.handle(PointerEvent::Released);
        let input = TickInput {
            spawn: tracker.end_frame(),
        };
        stepper.step(&mut state, &input).unwrap();

        assert_eq!(spawned, vec![8, 9, 10]);
        assert_eq!(state.store.count(), 11);
        assert_eq!(stepper.frames(), state.time_ticks);
    }

    #[test]
    fn test_stop_signal_halts_before_next_tick() {
        let mut state = state();
        let stop = StopSignal::new();
        let mut stepper = Stepper::new(60.0, stop.clone());
        stepper.step(&mut state, &TickInput::default()).unwrap();
        stop.raise();
        let out = stepper.step(&mut state, &TickInput::default()).unwrap();
        assert!(out.stopped);
        assert_eq!(out.report, None);
        assert_eq!(state.time_ticks, 1);
        assert!(stepper.stop_signal().is_raised());
    }

    #[test]
    fn test_remaining_fills_the_period() {
        let stepper = Stepper::new(50.0, StopSignal::new());
        assert_eq!(stepper.period(), Duration::from_millis(20));
        assert_eq!(stepper.remaining(Duration::from_millis(5)), Duration::from_millis(15));
        assert_eq!(stepper.remaining(Duration::from_millis(30)), Duration::ZERO);
    }
}
