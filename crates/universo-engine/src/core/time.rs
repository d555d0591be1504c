/// Simulation step length in milliseconds (60 Hz).
pub const STEP_MS: f64 = 1000.0 / 60.0;

/// Fixed timestep accumulator.
/// Keeps per-frame increments (spin, ciranda drift, tunnel speed) independent
/// of the host's display refresh rate.
pub struct FixedTimestep {
    /// The fixed delta time per tick, in milliseconds.
    dt: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
    /// Time cut off by the step cap, not yet handed to the clock.
    dropped: f64,
}

impl FixedTimestep {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            dropped: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        let cap = self.dt * 10.0;
        if self.accumulator > cap {
            self.dropped += self.accumulator - cap;
            self.accumulator = cap;
        }
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f64 * self.dt;
        steps
    }

    /// Take the time the step cap discarded since the last call.
    /// Phase timers still need it: they run on wall-clock time.
    pub fn take_dropped(&mut self) -> f64 {
        std::mem::take(&mut self.dropped)
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(STEP_MS)
    }
}

/// Session clock. All phase timers compare against `now_ms`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    /// Milliseconds since the session started.
    pub now_ms: f64,
    /// Simulation steps run so far.
    pub frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one step of `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64) {
        self.now_ms += dt_ms;
        self.frame += 1;
    }

    /// Move the clock forward without running a step.
    pub fn skip(&mut self, dt_ms: f64) {
        self.now_ms += dt_ms.max(0.0);
    }

    /// Milliseconds elapsed since `since`.
    pub fn elapsed(&self, since: f64) -> f64 {
        self.now_ms - since
    }
}

/// Normalized progress of a timer, clamped to [0, 1].
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0) as f32
}
