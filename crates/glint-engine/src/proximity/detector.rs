use glam::Vec2;

use crate::proximity::rect::Rect;

/// Visibility classification of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    /// Out of range; the dot renders invisible.
    #[default]
    Hidden,
    /// Pointer within the proximity radius (or touch fallback).
    Near,
    /// Discovered. Terminal; overrides distance.
    Found,
}

/// Result of one classification pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub tier: Tier,
    /// False when the reduced-motion preference is set: the tier still
    /// changes, but transitions must render without animation.
    pub animate: bool,
}

/// Environment inputs for the classification policy chain, threaded in
/// explicitly by the engine. No ambient globals.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyContext {
    /// Developer/admin override: force full visibility everywhere.
    pub debug_reveal: bool,
    /// Hover is unavailable; markers sit at a constant low-opacity tier.
    pub touch_device: bool,
    /// Accessibility preference: suppress animated transitions.
    pub reduced_motion: bool,
}

/// Ordered policy chain, evaluated top-down, each stage short-circuiting:
/// debug override, found, touch fallback, distance. Reduced motion is
/// orthogonal to the tier; it only clears the `animate` flag.
pub fn classify(
    found: bool,
    distance: Option<f32>,
    radius: f32,
    ctx: &PolicyContext,
) -> Classification {
    let animate = !ctx.reduced_motion;
    let tier = if ctx.debug_reveal {
        Tier::Found
    } else if found {
        Tier::Found
    } else if ctx.touch_device {
        Tier::Near
    } else {
        match distance {
            Some(d) if d <= radius => Tier::Near,
            _ => Tier::Hidden,
        }
    };
    Classification { tier, animate }
}

/// Per-marker proximity state.
///
/// Pointer samples are coalesced keep-latest; the engine calls `classify`
/// once per animation frame, so per-event work is a single Vec2 store.
pub struct ProximityDetector {
    /// Current bounding rectangle, absent until the first layout report.
    rect: Option<Rect>,
    radius: f32,
    /// Latest coalesced pointer sample.
    pointer: Option<Vec2>,
    tier: Tier,
    animate: bool,
}

impl ProximityDetector {
    pub fn new(radius: f32) -> Self {
        Self {
            rect: None,
            radius,
            pointer: None,
            tier: Tier::Hidden,
            animate: true,
        }
    }

    /// Update the bounding rectangle after a layout change.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }

    /// The marker is painted once it has reported a rectangle.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// Record a pointer-move sample. Keep-latest; no allocation.
    pub fn sample(&mut self, pointer: Vec2) {
        self.pointer = Some(pointer);
    }

    /// Re-classify from the latest sample. Called at most once per frame.
    pub fn classify(&mut self, found: bool, ctx: &PolicyContext) -> Classification {
        let distance = match (self.rect, self.pointer) {
            (Some(rect), Some(pointer)) => Some(rect.distance_to(pointer)),
            _ => None,
        };
        let result = classify(found, distance, self.radius, ctx);
        self.tier = result.tier;
        self.animate = result.animate;
        result
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn animate(&self) -> bool {
        self.animate
    }
}
