//! Effects: the engine's output language.
//!
//! The lifecycle state machine never touches the platform. Each step
//! returns a list of `Effect` values describing exactly what should happen
//! (style writes, watcher management, timers, frames, callback invocations)
//! and the caller executes them. Tests feed synthetic events and assert on
//! these lists; no clock or platform fakes needed.
//!
//! Order within a returned list is significant and must be preserved by
//! whoever executes it: an entrance emits its initial style write before
//! the frame request that will apply the animate style.

use serde::{Deserialize, Serialize};

use crate::style::StyleUpdate;
use crate::types::{ElementId, FrameToken, RevealHandle, TimerToken, WatcherId};
use crate::watcher::WatchOptions;

/// Which registered lifecycle callback to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackKind {
    /// The entrance began: the element just left its at-rest phase.
    EnterStart,
    /// The entrance completed: the element settled fully visible.
    EnterEnd,
}

/// One instruction for the embedding layer (or, for callback invocations,
/// for the engine itself).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Create a platform watcher with these options, identified by `watcher`
    /// in every later instruction and delivery.
    CreateWatcher {
        watcher: WatcherId,
        options: WatchOptions,
    },

    /// Start delivering measurements for `element` through `watcher`.
    Observe {
        watcher: WatcherId,
        element: ElementId,
    },

    /// Stop delivering measurements for `element`.
    Unobserve {
        watcher: WatcherId,
        element: ElementId,
    },

    /// Tear down the watcher entirely; its id is dead afterwards.
    DisconnectWatcher { watcher: WatcherId },

    /// Write this style onto the element. Elements that are gone at
    /// execution time are skipped silently.
    ApplyStyle {
        element: ElementId,
        update: StyleUpdate,
    },

    /// Request one animation-frame callback, reported back through
    /// `frame_fired(token)`.
    RequestFrame { token: FrameToken },

    /// Drop a requested frame; a late `frame_fired` for it is ignored.
    CancelFrame { token: FrameToken },

    /// Start a one-shot timer, reported back through `timer_fired(token)`.
    ScheduleCompletion { token: TimerToken, after_ms: u32 },

    /// Cancel a scheduled timer; a late `timer_fired` for it is ignored.
    CancelCompletion { token: TimerToken },

    /// Invoke one of the registration's lifecycle callbacks. Consumed by
    /// the engine itself, never surfaced to the embedding layer.
    InvokeCallback {
        handle: RevealHandle,
        element: ElementId,
        kind: CallbackKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_serialize_tagged() {
        let effect = Effect::ScheduleCompletion {
            token: TimerToken(7),
            after_ms: 600,
        };
        let json = serde_json::to_string(&effect).unwrap();
        assert!(json.contains("\"type\":\"schedule_completion\""));
        assert!(json.contains("\"after_ms\":600"));

        let parsed: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, effect);
    }
}
