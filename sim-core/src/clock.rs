/// Turns a millisecond counter into per-frame time steps.
///
/// The counter is expected to be monotonically non-decreasing. The first
/// tick has nothing to measure against and yields `0.0`; a counter that
/// runs backwards also yields `0.0`. Deltas longer than `max_dt` seconds
/// (a stalled or dragged window) are clamped so the integrator never takes
/// one huge step.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last_ms: Option<u64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Records `now_ms` and returns seconds elapsed since the previous tick.
    pub fn tick(&mut self, now_ms: u64) -> f32 {
        let dt = match self.last_ms {
            Some(prev) => now_ms.saturating_sub(prev) as f32 / 1000.0,
            None => 0.0,
        };
        self.last_ms = Some(self.last_ms.map_or(now_ms, |prev| prev.max(now_ms)));
        dt.min(self.max_dt)
    }

    /// Forgets the previous tick, so the next one yields `0.0` again.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
