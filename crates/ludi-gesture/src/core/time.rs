/// Accumulates explicit frame deltas.
/// Sessions never read a wall clock; the host passes `dt` each update.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    elapsed: f32,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self { elapsed: 0.0 }
    }

    /// Add frame time. Negative deltas are ignored.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether at least `duration` seconds have accumulated.
    pub fn reached(&self, duration: f32) -> bool {
        self.elapsed >= duration
    }
}

/// Counts down from a fixed duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    /// A countdown that has already run out.
    pub fn finished() -> Self {
        Self { remaining: 0.0 }
    }

    /// Consume frame time. Returns true once the countdown has run out.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
