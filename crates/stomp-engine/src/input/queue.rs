/// Input events the session understands. The host translates its own
/// keyboard/controller events into these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// Release every held key (window lost focus).
    ReleaseAll,
    /// A custom event from the UI layer.
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Pending events beyond this are dropped until the next drain.
pub const MAX_PENDING: usize = 256;

/// The host pushes events as they arrive; the session drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
    dropped: usize,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
            dropped: 0,
        }
    }

    /// Queue an event. A host that stops ticking (hidden tab) cannot grow
    /// the queue past [`MAX_PENDING`].
    pub fn push(&mut self, event: InputEvent) {
        if self.events.len() >= MAX_PENDING {
            self.dropped += 1;
            return;
        }
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        if self.dropped > 0 {
            log::warn!("input queue full: dropped {} events", self.dropped);
            self.dropped = 0;
        }
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
