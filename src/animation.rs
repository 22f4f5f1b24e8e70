//! Growth animation: the plotted polygons scale from 0 to full size in
//! fixed steps, then the animation stops for good.
//!
//! The display backend owns the loop and calls [`Animation::tick`] once per
//! frame; the animation itself has no scheduler and no cancel/pause surface.

/// Scale increment applied per frame.
pub const SCALE_STEP: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Growing,
    Stopped,
}

/// Per-chart animation state. Starts at scale 0 in `Growing`; once the
/// scale has been driven past 1 the next tick transitions to `Stopped` and
/// every later tick is a no-op.
#[derive(Debug, Clone)]
pub struct Animation {
    frame: u32,
    scale: f64,
    state: State,
}

impl Animation {
    pub fn new() -> Self {
        Self { frame: 0, scale: 0.0, state: State::Growing }
    }

    /// Advance one frame. Returns `true` when a frame should be drawn at
    /// the new [`scale`](Self::scale), `false` once the animation has
    /// stopped (no draw, no reschedule).
    ///
    /// The guard runs on the *current* scale, so the last drawn frame is
    /// the one driven just past 1.0.
    pub fn tick(&mut self) -> bool {
        if self.state == State::Stopped {
            return false;
        }
        if !(0.0..=1.0).contains(&self.scale) {
            self.state = State::Stopped;
            return false;
        }
        self.frame += 1;
        // Derive the scale from the frame counter: accumulating SCALE_STEP
        // in f64 drifts past 1.0 one frame early, 50 * 0.02 lands on it.
        self.scale = f64::from(self.frame) * SCALE_STEP;
        true
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_stopped(&self) -> bool {
        self.state == State::Stopped
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}
