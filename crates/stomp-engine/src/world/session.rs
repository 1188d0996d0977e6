use super::level::Level;
use crate::api::config::SimConfig;
use crate::api::events::GameEvent;
use crate::assets::layout::LevelLayout;
use crate::entities::Simulated;
use crate::input::intent::PlayerIntent;

/// Where the session is in its lives / game-over loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    /// The player died; the death hop plays out before a life is taken.
    DeathAnimation,
    LivesScreen,
    GameOver,
}

impl SessionState {
    pub fn code(self) -> u32 {
        match self {
            SessionState::Playing => 0,
            SessionState::DeathAnimation => 1,
            SessionState::LivesScreen => 2,
            SessionState::GameOver => 3,
        }
    }
}

/// Lives and level restarts around a [`Level`].
pub struct Session {
    config: SimConfig,
    layout: LevelLayout,
    level: Level,
    lives: u32,
    state: SessionState,
    state_timer: f32,
}

impl Session {
    pub fn new(config: SimConfig, layout: LevelLayout) -> Self {
        let level = Level::new(&config, &layout);
        let lives = config.lives;
        log::info!("session started with {} lives", lives);
        Self {
            config,
            layout,
            level,
            lives,
            state: SessionState::Playing,
            state_timer: 0.0,
        }
    }

    /// Advance one fixed tick. Only `Playing` produces gameplay events.
    pub fn step(&mut self, dt: f32, intent: PlayerIntent) -> Vec<GameEvent> {
        match self.state {
            SessionState::Playing => {
                let events = self.level.step(dt, intent);
                if self.level.player().is_dead() {
                    self.enter(SessionState::DeathAnimation);
                }
                events
            }
            SessionState::DeathAnimation => {
                self.level.step_death_animation(dt);
                let limit = self.config.fall_death_y + self.config.death_fall_margin;
                if self.level.player().position().y > limit {
                    self.lose_life();
                }
                Vec::new()
            }
            SessionState::LivesScreen => {
                self.state_timer += dt;
                if self.state_timer >= self.config.lives_screen_time {
                    self.restart_level();
                }
                Vec::new()
            }
            SessionState::GameOver => {
                self.state_timer += dt;
                if self.state_timer >= self.config.game_over_time {
                    self.lives = self.config.lives;
                    log::info!("new game");
                    self.enter(SessionState::LivesScreen);
                }
                Vec::new()
            }
        }
    }

    fn enter(&mut self, state: SessionState) {
        self.state = state;
        self.state_timer = 0.0;
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::info!("life lost, {} remaining", self.lives);
        if self.lives > 0 {
            self.enter(SessionState::LivesScreen);
        } else {
            log::info!("game over");
            self.enter(SessionState::GameOver);
        }
    }

    fn restart_level(&mut self) {
        self.level = Level::new(&self.config, &self.layout);
        self.enter(SessionState::Playing);
    }

    /// Start a new game from scratch: full lives, fresh level.
    pub fn reset(&mut self) {
        self.lives = self.config.lives;
        self.restart_level();
        log::info!("session reset");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn is_goal_reached(&self) -> bool {
        self.level.is_goal_reached()
    }

    pub fn is_goal_animation_complete(&self) -> bool {
        self.level.is_goal_animation_complete()
    }
}
