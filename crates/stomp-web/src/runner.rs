use stomp_engine::bridge::protocol::{
    HEADER_CAMERA_X, HEADER_FRAME_COUNTER, HEADER_GOAL_COMPLETE, HEADER_GOAL_REACHED,
    HEADER_GROUND_Y, HEADER_LEVEL_WIDTH, HEADER_LIVES, HEADER_SESSION_STATE,
};
use stomp_engine::{
    EntitySnapshot, EventRecord, FixedTimestep, InputEvent, InputQueue, KeyState, LevelLayout,
    PlayerIntent, ProtocolLayout, Session, SimConfig, Simulated,
};

/// Custom event kinds the host may send through `InputEvent::Custom`.
pub mod custom {
    /// Start a new game (full lives, fresh level).
    pub const RESET: u32 = 1;
}

/// Drives a [`Session`] from variable host frames.
///
/// wasm-bindgen cannot export this struct's lifetime-bound accessors
/// directly, so the crate keeps one runner in a `thread_local!` and exports
/// free functions through [`export_session!`](crate::export_session).
pub struct SessionRunner {
    session: Session,
    input: InputQueue,
    keys: KeyState,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    snapshots: Vec<EntitySnapshot>,
    events: Vec<EventRecord>,
    /// Flat frame buffer read by the host: header, snapshots, events.
    frame: Vec<f32>,
    frame_counter: u32,
}

impl SessionRunner {
    pub fn new(config: SimConfig, level: LevelLayout) -> Self {
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame);
        let layout = ProtocolLayout::default();
        let mut runner = Self {
            session: Session::new(config, level),
            input: InputQueue::new(),
            keys: KeyState::new(),
            timestep,
            snapshots: Vec::with_capacity(layout.max_snapshots),
            events: Vec::with_capacity(layout.max_events),
            frame: vec![0.0; layout.buffer_total_floats],
            layout,
            frame_counter: 0,
        };
        runner.publish();
        runner
    }

    /// Build a runner from optional JSON documents. `None` (or an empty
    /// string) keeps the built-in defaults.
    pub fn from_json(config: Option<&str>, level: Option<&str>) -> Result<Self, serde_json::Error> {
        let config = match config.filter(|s| !s.trim().is_empty()) {
            Some(json) => SimConfig::from_json(json)?,
            None => SimConfig::default(),
        };
        let level = match level.filter(|s| !s.trim().is_empty()) {
            Some(json) => LevelLayout::from_json(json)?,
            None => LevelLayout::default(),
        };
        Ok(Self::new(config, level))
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: fold input, run the fixed ticks it owes, then
    /// rebuild the frame buffer.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            if let InputEvent::Custom { kind: custom::RESET, .. } = event {
                self.session.reset();
                self.timestep.reset();
                continue;
            }
            self.keys.apply(&event);
        }
        let intent = PlayerIntent::from_keys(&self.keys);

        self.events.clear();
        let steps = self.timestep.accumulate(dt);
        let fixed_dt = self.timestep.dt();
        for _ in 0..steps {
            for event in self.session.step(fixed_dt, intent) {
                self.events.push(EventRecord::from(&event));
            }
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.publish();
    }

    fn publish(&mut self) {
        let level = self.session.level();
        level.snapshots(&mut self.snapshots);
        self.layout
            .write_sections(&mut self.frame, &self.snapshots, &self.events);

        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        self.frame[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        self.frame[HEADER_LIVES] = self.session.lives() as f32;
        self.frame[HEADER_SESSION_STATE] = self.session.state().code() as f32;
        self.frame[HEADER_GOAL_REACHED] = flag(self.session.is_goal_reached());
        self.frame[HEADER_GOAL_COMPLETE] = flag(self.session.is_goal_animation_complete());
        self.frame[HEADER_LEVEL_WIDTH] = level.level_width();
        self.frame[HEADER_GROUND_Y] = level.ground_y();
        self.frame[HEADER_CAMERA_X] = level.player().position().x;
    }

    // ---- Accessors for host reads ----

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    pub fn snapshots_ptr(&self) -> *const f32 {
        self.snapshots.as_ptr() as *const f32
    }

    pub fn snapshot_count(&self) -> u32 {
        self.snapshots.len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn event_count(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn lives(&self) -> u32 {
        self.session.lives()
    }

    pub fn session_state(&self) -> u32 {
        self.session.state().code()
    }

    pub fn is_goal_reached(&self) -> bool {
        self.session.is_goal_reached()
    }

    pub fn is_goal_animation_complete(&self) -> bool {
        self.session.is_goal_animation_complete()
    }

    pub fn max_snapshots(&self) -> u32 {
        self.layout.max_snapshots as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }
}
