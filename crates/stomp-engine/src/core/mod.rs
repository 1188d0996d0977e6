#[cfg(feature = "physics")]
pub mod body;
pub mod geometry;
#[cfg(feature = "physics")]
pub mod physics;
pub mod time;
