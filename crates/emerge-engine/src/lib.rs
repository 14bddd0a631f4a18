//! Runtime engine for scroll-reveal animations.
//!
//! This crate provides:
//! - **Watcher pooling**: Registrations with equal watch conditions share
//!   one platform intersection watcher
//! - **Lifecycle**: A pure per-element state machine for the enter cycle
//!   (idle, entering, visible, leaving, hidden)
//! - **Style computation**: Initial, animate, and settled styles for the
//!   fade, slide, zoom, and flip families
//! - **Effects and events**: An ordered platform instruction stream plus
//!   lifecycle notifications and callbacks
//!
//! # Architecture
//!
//! ```text
//! RevealEngine
//!   ├── WatcherPool (conditions → shared watcher, member tracking)
//!   ├── ElementState per registration (pure lifecycle steps → effects)
//!   └── EventQueue + RevealCallbacks (lifecycle notifications)
//!
//! Embedder loop
//!   └── drain_effects() → execute against the platform →
//!       deliver_intersections / frame_fired / timer_fired back in
//! ```
//!
//! The engine itself never calls the platform and never reads a clock, so
//! every behavior can be exercised in tests by feeding inputs and
//! inspecting the drained effects.

pub mod effects;
pub mod engine;
pub mod events;
pub mod lifecycle;
pub mod style;
pub mod types;
pub mod visibility;
pub mod watcher;

pub use effects::{CallbackKind, Effect};
pub use engine::RevealEngine;
pub use events::{EventQueue, RevealCallback, RevealCallbacks, RevealEvent};
pub use lifecycle::{ElementState, LifecycleEvent, TokenSource};
pub use style::{
    Axis, ComputedStyle, FLIP_ANGLE_DEG, FLIP_PERSPECTIVE_PX, RevealTransform, SLIDE_DISTANCE_PX,
    StyleHints, StylePhase, StyleUpdate, TransitionStyle, ZOOM_SCALE_IN, ZOOM_SCALE_OUT, style_for,
};
pub use types::{
    Capabilities, ElementId, FrameToken, IntersectionRecord, RevealHandle, RevealPhase,
    TimerToken, WatcherId,
};
pub use visibility::should_be_visible;
pub use watcher::{WatchOptions, WatcherPool};
