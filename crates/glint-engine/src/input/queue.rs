use crate::api::types::{ActivationSource, MarkerHandle};
use crate::proximity::rect::Rect;

/// Input event types the engine understands.
/// The page UI pushes these; the engine drains them once per tick.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// The pointer moved to page coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A marker was clicked, tapped, or keyboard-activated.
    Activate {
        marker: MarkerHandle,
        source: ActivationSource,
    },
    /// The pointer entered a marker's hover region.
    HoverEnter { marker: MarkerHandle },
    /// The pointer left a marker's hover region.
    HoverLeave { marker: MarkerHandle },
    /// A marker received keyboard focus.
    FocusGained { marker: MarkerHandle },
    /// A marker lost keyboard focus.
    FocusLost { marker: MarkerHandle },
    /// Touch long-press on a marker (the touch analogue of hover).
    LongPress { marker: MarkerHandle },
    /// `Escape` pressed anywhere; dismisses hints.
    Escape,
    /// A marker's bounding rectangle changed (layout reflow, resize).
    LayoutChange { marker: MarkerHandle, rect: Rect },
}

/// A queue of input events.
/// The UI layer writes events into the queue; the engine drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
