use std::time::Instant;

/// Pause state and wall-clock frame delta
///
/// There is no fixed-step accumulator: `dt` is whatever time passed since the
/// previous tick, scaled by `time_scale`.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    paused: bool,
    last_tick: Option<Instant>,
    pub time_scale: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            paused: false,
            last_tick: None,
            time_scale: 1.0,
        }
    }

    /// Seconds since the previous tick; the first tick yields 0
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        dt * self.time_scale.max(0.0)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

/// Turns a level signal ("key is held") into a single press edge
#[derive(Debug, Clone, Default)]
pub struct PressLatch {
    held: bool,
}

impl PressLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level; true only on the frame the key goes down
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.held;
        self.held = down;
        pressed
    }
}
