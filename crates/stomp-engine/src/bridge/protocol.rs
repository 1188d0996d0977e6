//! Flat frame buffer shared with the host.
//! Must stay in sync with the host's reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Snapshots: max_snapshots × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame so the host can
//! compute offsets without hardcoding them.

use crate::api::events::EventRecord;
use crate::bridge::snapshot::EntitySnapshot;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_SNAPSHOTS: usize = 2;
pub const HEADER_SNAPSHOT_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_LIVES: usize = 6;
pub const HEADER_SESSION_STATE: usize = 7;
pub const HEADER_GOAL_REACHED: usize = 8;
pub const HEADER_GOAL_COMPLETE: usize = 9;
pub const HEADER_LEVEL_WIDTH: usize = 10;
pub const HEADER_GROUND_Y: usize = 11;
pub const HEADER_CAMERA_X: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

pub const DEFAULT_MAX_SNAPSHOTS: usize = 256;
pub const DEFAULT_MAX_EVENTS: usize = 32;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_snapshots: usize,
    pub max_events: usize,

    /// Size of the snapshot section in floats.
    pub snapshot_data_floats: usize,
    /// Size of the event section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where snapshot data begins.
    pub snapshot_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_snapshots: usize, max_events: usize) -> Self {
        let snapshot_data_floats = max_snapshots * EntitySnapshot::FLOATS;
        let event_data_floats = max_events * EventRecord::FLOATS;

        let snapshot_data_offset = HEADER_FLOATS;
        let event_data_offset = snapshot_data_offset + snapshot_data_floats;
        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_snapshots,
            max_events,
            snapshot_data_floats,
            event_data_floats,
            snapshot_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Copy snapshots and events into `buffer`, truncating each section at
    /// its capacity. Returns the counts actually written.
    pub fn write_sections(
        &self,
        buffer: &mut [f32],
        snapshots: &[EntitySnapshot],
        events: &[EventRecord],
    ) -> (usize, usize) {
        let snapshot_count = snapshots.len().min(self.max_snapshots);
        let event_count = events.len().min(self.max_events);
        if snapshots.len() > self.max_snapshots || events.len() > self.max_events {
            log::warn!(
                "frame buffer overflow: {} snapshots / {} events (capacity {} / {})",
                snapshots.len(),
                events.len(),
                self.max_snapshots,
                self.max_events
            );
        }

        let snap_floats: &[f32] = bytemuck::cast_slice(&snapshots[..snapshot_count]);
        let start = self.snapshot_data_offset;
        buffer[start..start + snap_floats.len()].copy_from_slice(snap_floats);

        let event_floats: &[f32] = bytemuck::cast_slice(&events[..event_count]);
        let start = self.event_data_offset;
        buffer[start..start + event_floats.len()].copy_from_slice(event_floats);

        buffer[HEADER_MAX_SNAPSHOTS] = self.max_snapshots as f32;
        buffer[HEADER_SNAPSHOT_COUNT] = snapshot_count as f32;
        buffer[HEADER_MAX_EVENTS] = self.max_events as f32;
        buffer[HEADER_EVENT_COUNT] = event_count as f32;
        buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;

        (snapshot_count, event_count)
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SNAPSHOTS, DEFAULT_MAX_EVENTS)
    }
}
