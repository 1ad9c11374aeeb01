//! Pointer tracking and drag-to-spawn

use glam::DVec2;

use crate::sim::SpawnRequest;

/// Raw pointer events from the window system
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed,
    Released,
    Moved(DVec2),
}

/// Pointer state observed once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub pressed: bool,
    pub position: DVec2,
}

/// Turns a stream of per-frame pointer samples into spawn requests
///
/// The previous position is recorded every frame, pressed or not, so a drag
/// that starts after the pointer has been moving spawns with the motion of the
/// last frame only.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    current: PointerSample,
    last_position: Option<DVec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a window-system event into the current pointer state
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Pressed => self.current.pressed = true,
            PointerEvent::Released => self.current.pressed = false,
            PointerEvent::Moved(pos) => self.current.position = pos,
        }
    }

    pub fn current(&self) -> PointerSample {
        self.current
    }

    /// Close out a frame using the state accumulated from events
    pub fn end_frame(&mut self) -> Option<SpawnRequest> {
        let sample = self.current;
        self.sample(sample)
    }

    /// Record a frame's sample; yields a spawn request while pressed
    pub fn sample(&mut self, sample: PointerSample) -> Option<SpawnRequest> {
        self.current = sample;
        let last = self.last_position.replace(sample.position).unwrap_or(sample.position);
        sample.pressed.then(|| SpawnRequest {
            position: sample.position,
            velocity_hint: sample.position - last,
        })
    }
}
