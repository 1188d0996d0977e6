//! Level orchestration: entity storage, collision arbitration, the per-tick
//! step driver and the lives loop around it.

pub mod arbiter;
pub mod cooldown;
pub mod level;
pub mod scene;
pub mod session;
