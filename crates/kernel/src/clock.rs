/// Turns host frame timestamps into elapsed seconds for [`crate::Simulation::tick`].
///
/// Holds no real clock; the host passes whatever its refresh callback
/// reports. The simulation applies the dt cap, not the clock.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous timestamp. The first call, and any call
    /// where time runs backwards, yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let elapsed = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        elapsed
    }

    /// Forget the previous timestamp, e.g. after the host was paused.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
