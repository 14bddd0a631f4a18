//! Core types shared across the reveal engine.
//!
//! This module defines:
//! - Identity newtypes: elements, registrations, watchers, timer and frame
//!   tokens
//! - `RevealPhase`: the per-element lifecycle phase
//! - `IntersectionRecord`: one visibility measurement for one element
//! - `Capabilities`: the platform probe threaded into the engine once at
//!   construction

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque identity of a watchable element, assigned by the embedding layer.
///
/// The engine never dereferences an element; it only routes measurements,
/// styles and callbacks by this identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Unique identifier for one registration of one element.
///
/// A fresh handle is issued on every `register` call, so re-registering an
/// element invalidates the previous handle rather than aliasing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RevealHandle(pub u64);

impl RevealHandle {
    /// Generate a new unique handle.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RevealHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of one pooled platform watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WatcherId(pub u64);

/// Correlation token for a scheduled completion timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(pub u64);

/// Correlation token for a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameToken(pub u64);

/// Lifecycle phase of a registered element.
///
/// `Idle` and `Hidden` are the two at-rest phases: nothing is pending and a
/// visibility signal can start an entrance. `Leaving` only occurs
/// transiently while a mirrored reveal is being reversed; it resolves to
/// `Idle` within the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    /// Registered, nothing measured or everything reset.
    #[default]
    Idle,
    /// Entrance in flight: animate style applied or about to be, completion
    /// timer pending.
    Entering,
    /// Entrance finished; the element rests fully shown.
    Visible,
    /// Mirror exit in progress (transient).
    Leaving,
    /// Measured outside the viewport with nothing pending.
    Hidden,
}

impl RevealPhase {
    /// Whether this phase has no pending style application.
    pub fn is_at_rest(&self) -> bool {
        matches!(self, Self::Idle | Self::Hidden)
    }
}

/// One visibility measurement for one element, demultiplexed from a watcher
/// batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionRecord {
    /// The element the measurement is about.
    pub target: ElementId,
    /// Fraction of the target inside the margin-adjusted root, 0 to 1.
    pub ratio: f64,
    /// Raw platform flag: any overlap at all.
    pub is_intersecting: bool,
}

impl IntersectionRecord {
    pub fn new(target: ElementId, ratio: f64, is_intersecting: bool) -> Self {
        Self {
            target,
            ratio,
            is_intersecting,
        }
    }
}

/// Platform capability probe, computed once by the embedding layer and
/// passed to the engine constructor.
///
/// When animations are disabled (no watcher support, or the user prefers
/// reduced motion) every registration settles immediately in its final
/// visible state and the watcher pool is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Whether the platform can create viewport-intersection watchers.
    pub watchers_supported: bool,
    /// Whether the user asked for motion to be minimized.
    pub prefers_reduced_motion: bool,
}

impl Capabilities {
    /// Watchers available, motion welcome.
    pub fn full() -> Self {
        Self {
            watchers_supported: true,
            prefers_reduced_motion: false,
        }
    }

    /// Watchers available, but the user prefers reduced motion.
    pub fn reduced_motion() -> Self {
        Self {
            watchers_supported: true,
            prefers_reduced_motion: true,
        }
    }

    /// No intersection watcher support at all.
    pub fn no_watchers() -> Self {
        Self {
            watchers_supported: false,
            prefers_reduced_motion: false,
        }
    }

    /// Whether reveals can animate at all under this probe.
    pub fn animations_enabled(&self) -> bool {
        self.watchers_supported && !self.prefers_reduced_motion
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let a = RevealHandle::new();
        let b = RevealHandle::new();
        let c = RevealHandle::new();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(a.0 < b.0 && b.0 < c.0);
    }

    #[test]
    fn test_phase_at_rest() {
        assert!(RevealPhase::Idle.is_at_rest());
        assert!(RevealPhase::Hidden.is_at_rest());
        assert!(!RevealPhase::Entering.is_at_rest());
        assert!(!RevealPhase::Visible.is_at_rest());
        assert!(!RevealPhase::Leaving.is_at_rest());
    }

    #[test]
    fn test_capability_gating() {
        assert!(Capabilities::full().animations_enabled());
        assert!(!Capabilities::reduced_motion().animations_enabled());
        assert!(!Capabilities::no_watchers().animations_enabled());
        assert!(Capabilities::default().animations_enabled());
    }

    #[test]
    fn test_phase_serde_keywords() {
        let json = serde_json::to_string(&RevealPhase::Entering).unwrap();
        assert_eq!(json, "\"entering\"");
    }
}
