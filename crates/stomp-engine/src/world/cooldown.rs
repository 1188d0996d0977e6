/// Shared window that suppresses new stomp / kick resolutions after one
/// occurs. Ticked by the level once per frame; armed by the arbiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StompCooldown {
    window: f32,
    remaining: f32,
}

impl StompCooldown {
    pub fn new(window: f32) -> Self {
        Self {
            window: window.max(0.0),
            remaining: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Restart the full window.
    pub fn arm(&mut self) {
        self.remaining = self.window;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
