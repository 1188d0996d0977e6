use serde::{Deserialize, Serialize};

/// Simulation configuration. Every field has a default so a partial JSON
/// document (or none at all) is enough to run a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Upper bound on fixed ticks run for one rendered frame.
    pub max_steps_per_frame: u32,
    /// Downward gravity in physics units per second squared.
    pub gravity: f32,
    /// Player falling below this Y (pixels) dies instantly.
    pub fall_death_y: f32,
    /// Extra distance below `fall_death_y` the death hop must fall before
    /// the session counts the life as lost.
    pub death_fall_margin: f32,
    /// Window after a stomp or kick during which no new one resolves.
    pub stomp_cooldown: f32,
    /// Minimum downward speed (physics units) for a head landing to count as a stomp.
    pub stomp_min_fall_speed: f32,
    /// Lives at the start of a game.
    pub lives: u32,
    /// Seconds the "lives remaining" screen is held before the level restarts.
    pub lives_screen_time: f32,
    /// Seconds the game-over screen is held before a new game starts.
    pub game_over_time: f32,
    /// Player movement tuning.
    pub player: PlayerTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            gravity: 9.8,
            fall_death_y: 650.0,
            death_fall_margin: 100.0,
            stomp_cooldown: 0.5,
            stomp_min_fall_speed: 0.5,
            lives: 3,
            lives_screen_time: 2.0,
            game_over_time: 3.0,
            player: PlayerTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a configuration from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Player movement constants. Speeds are in physics units, times in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Continuous same-direction input needed before the run ramp starts.
    pub run_delay: f32,
    /// Time to interpolate from walk to run speed once the ramp starts.
    pub run_ramp: f32,
    /// Multiplicative velocity decay per update while skidding or releasing input.
    pub skid_damping: f32,
    pub jump_speed: f32,
    /// Extra gravity (multiples of g) while falling.
    pub fall_gravity: f32,
    /// Extra gravity (multiples of g) while rising without the jump key held.
    pub low_jump_gravity: f32,
    /// |vy| below this counts as resting.
    pub ground_epsilon: f32,
    /// How long |vy| must stay below `ground_epsilon` before jumping is re-enabled.
    pub ground_time: f32,
    pub invulnerability_time: f32,
    pub fireball_cooldown: f32,
    pub throw_animation_time: f32,
    pub death_hop_speed: f32,
    pub bounce_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            run_speed: 7.0,
            run_delay: 0.35,
            run_ramp: 0.5,
            skid_damping: 0.85,
            jump_speed: 7.5,
            fall_gravity: 1.5,
            low_jump_gravity: 1.0,
            ground_epsilon: 0.1,
            ground_time: 0.05,
            invulnerability_time: 2.0,
            fireball_cooldown: 0.5,
            throw_animation_time: 0.15,
            death_hop_speed: 8.0,
            bounce_speed: 6.0,
        }
    }
}
