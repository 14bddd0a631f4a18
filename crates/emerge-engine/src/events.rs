//! Lifecycle events and per-registration callbacks.
//!
//! Every entrance reports two moments: when it starts (the element leaves
//! its at-rest phase) and when it completes (the element settles fully
//! visible). Both are delivered twice over:
//! - queued as [`RevealEvent`]s, polled engine-wide after feeding inputs
//! - pushed into the [`RevealCallbacks`] registered for that element
//!
//! Unregistration drops both paths atomically; no event or callback for a
//! registration is delivered after `unregister` returns.
//!
//! # Usage
//!
//! ```ignore
//! use emerge_engine::{RevealEngine, RevealEvent};
//!
//! let mut engine = RevealEngine::new(capabilities);
//! // ... register elements, feed measurements ...
//! for event in engine.drain_events() {
//!     match event {
//!         RevealEvent::EnterStarted { element, .. } => println!("{element:?} entering"),
//!         RevealEvent::EnterEnded { element, .. } => println!("{element:?} settled"),
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effects::CallbackKind;
use crate::types::{ElementId, RevealHandle};

/// Event emitted when a reveal crosses a lifecycle boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealEvent {
    /// The entrance began.
    EnterStarted {
        /// The registration the event belongs to.
        handle: RevealHandle,
        /// The element being revealed.
        element: ElementId,
    },
    /// The entrance completed and the element settled.
    EnterEnded {
        /// The registration the event belongs to.
        handle: RevealHandle,
        /// The element that settled.
        element: ElementId,
    },
}

impl RevealEvent {
    /// Build the event for a callback kind.
    pub fn from_kind(kind: CallbackKind, handle: RevealHandle, element: ElementId) -> Self {
        match kind {
            CallbackKind::EnterStart => Self::EnterStarted { handle, element },
            CallbackKind::EnterEnd => Self::EnterEnded { handle, element },
        }
    }

    /// Get the registration handle for this event.
    pub fn handle(&self) -> RevealHandle {
        match self {
            Self::EnterStarted { handle, .. } | Self::EnterEnded { handle, .. } => *handle,
        }
    }

    /// Get the element for this event.
    pub fn element(&self) -> ElementId {
        match self {
            Self::EnterStarted { element, .. } | Self::EnterEnded { element, .. } => *element,
        }
    }

    /// Check if this is an "entrance started" event.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::EnterStarted { .. })
    }

    /// Check if this is an "entrance ended" event.
    pub fn is_ended(&self) -> bool {
        matches!(self, Self::EnterEnded { .. })
    }
}

/// Queue for collecting reveal events while inputs are being fed.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<RevealEvent>,
}

impl EventQueue {
    /// Create a new empty event queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event onto the queue.
    pub fn push(&mut self, event: RevealEvent) {
        self.events.push_back(event);
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get the number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Pop the next event from the queue.
    pub fn pop(&mut self) -> Option<RevealEvent> {
        self.events.pop_front()
    }

    /// Drain all events from the queue, returning an iterator.
    pub fn drain(&mut self) -> impl Iterator<Item = RevealEvent> + '_ {
        self.events.drain(..)
    }

    /// Peek at the next event without removing it.
    pub fn peek(&self) -> Option<&RevealEvent> {
        self.events.front()
    }

    /// Clear all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Get pending events for a specific element.
    pub fn events_for_element(&self, element: ElementId) -> Vec<&RevealEvent> {
        self.events.iter().filter(|e| e.element() == element).collect()
    }

    /// Drop every pending event for a specific registration.
    pub fn remove_for_handle(&mut self, handle: RevealHandle) {
        self.events.retain(|e| e.handle() != handle);
    }
}

/// Callback invoked with the element a lifecycle boundary belongs to.
pub type RevealCallback = Box<dyn FnMut(ElementId) + Send>;

/// Optional per-registration lifecycle callbacks.
#[derive(Default)]
pub struct RevealCallbacks {
    /// Invoked when the entrance begins.
    pub on_enter_start: Option<RevealCallback>,
    /// Invoked when the entrance completes.
    pub on_enter_end: Option<RevealCallback>,
}

impl RevealCallbacks {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entrance-started callback.
    pub fn with_enter_start(mut self, callback: impl FnMut(ElementId) + Send + 'static) -> Self {
        self.on_enter_start = Some(Box::new(callback));
        self
    }

    /// Set the entrance-completed callback.
    pub fn with_enter_end(mut self, callback: impl FnMut(ElementId) + Send + 'static) -> Self {
        self.on_enter_end = Some(Box::new(callback));
        self
    }

    /// Invoke the callback for a kind, if registered.
    pub(crate) fn invoke(&mut self, kind: CallbackKind, element: ElementId) {
        let slot = match kind {
            CallbackKind::EnterStart => &mut self.on_enter_start,
            CallbackKind::EnterEnd => &mut self.on_enter_end,
        };
        if let Some(callback) = slot {
            callback(element);
        }
    }
}

impl fmt::Debug for RevealCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealCallbacks")
            .field("on_enter_start", &self.on_enter_start.is_some())
            .field("on_enter_end", &self.on_enter_end.is_some())
            .finish()
    }
}
