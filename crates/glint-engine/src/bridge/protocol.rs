//! Flat buffer layout read by the page UI each frame.
//! Must stay in sync with TypeScript `glint-protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Snapshots: marker_count × 8 floats]
//! [Events:    event_count  × 4 floats]
//! ```
//!
//! Snapshots appear in mount order; events in emission order.

use bytemuck::{Pod, Zeroable};

use crate::api::types::EngineEvent;
use crate::proximity::detector::Tier;

/// Protocol version; bump on any wire-format change.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Tier wire codes.
pub const TIER_HIDDEN: f32 = 0.0;
pub const TIER_NEAR: f32 = 1.0;
pub const TIER_FOUND: f32 = 2.0;

/// Event kind codes.
pub const EVENT_DISCOVERED: f32 = 1.0;
pub const EVENT_PROGRESS: f32 = 2.0;
pub const EVENT_COMPLETION_READY: f32 = 3.0;
pub const EVENT_SIGN_IN_PROMPT: f32 = 4.0;

/// Per-marker render state for one frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct MarkerSnapshot {
    /// Mount handle, for correlating with DOM nodes.
    pub handle: f32,
    /// Visibility tier wire code.
    pub tier: f32,
    /// Render opacity in [0, 1], derived from tier and device policy.
    pub opacity: f32,
    /// Pulse progress in [0, 1]; zero when not pulsing.
    pub pulse: f32,
    /// 0 when reduced motion suppresses animated transitions.
    pub animate: f32,
    /// Remaining acknowledgement lifetime fraction; zero when hidden.
    pub ack: f32,
    /// 1 while the hint label is visible.
    pub hint: f32,
    pub _pad: f32,
}

impl MarkerSnapshot {
    pub const FLOATS: usize = 8;
}

/// An engine event on the wire: kind plus three payload floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct EventRecord {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl EventRecord {
    pub const FLOATS: usize = 4;
}

/// Wire code for a tier.
pub fn tier_code(tier: Tier) -> f32 {
    match tier {
        Tier::Hidden => TIER_HIDDEN,
        Tier::Near => TIER_NEAR,
        Tier::Found => TIER_FOUND,
    }
}

/// Encode an engine event for the flat buffer. String payloads (marker ids)
/// do not cross this boundary; the UI resolves them from the handle.
pub fn encode_event(event: &EngineEvent) -> EventRecord {
    match event {
        EngineEvent::Discovered { handle, bonus, .. } => EventRecord {
            kind: EVENT_DISCOVERED,
            a: handle.map(|h| h.0 as f32).unwrap_or(-1.0),
            b: if *bonus { 1.0 } else { 0.0 },
            c: 0.0,
        },
        EngineEvent::Progress { found, total } => EventRecord {
            kind: EVENT_PROGRESS,
            a: *found as f32,
            b: *total as f32,
            c: 0.0,
        },
        EngineEvent::CompletionReady => EventRecord {
            kind: EVENT_COMPLETION_READY,
            ..Default::default()
        },
        EngineEvent::SignInPrompt { handle } => EventRecord {
            kind: EVENT_SIGN_IN_PROMPT,
            a: handle.0 as f32,
            ..Default::default()
        },
    }
}

/// Reused per-frame snapshot storage, readable as a flat f32 slice.
#[derive(Debug, Default)]
pub struct SnapshotBuffer {
    snapshots: Vec<MarkerSnapshot>,
}

impl SnapshotBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn push(&mut self, snapshot: MarkerSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[MarkerSnapshot] {
        &self.snapshots
    }

    /// The buffer as raw floats for the WASM boundary.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.snapshots)
    }
}
