//! Scroll-reveal animation engine.
//!
//! `emerge` animates elements as they scroll into view: fade, slide, zoom,
//! and flip entrances driven by viewport-intersection measurements. The
//! workspace splits into two crates, both re-exported here:
//!
//! - [`config`] (`emerge-config`): the declarative layer. Raw
//!   [`RevealSpec`]s are normalized leniently into canonical
//!   [`RevealConfig`]s (never failing, with diagnostics) or validated
//!   strictly for authoring tools.
//! - [`engine`] (`emerge-engine`): the runtime layer. The
//!   [`RevealEngine`] pools platform watchers, runs each element's
//!   entrance lifecycle, and exchanges ordered effect and event streams
//!   with the embedder.
//!
//! # Example
//!
//! ```ignore
//! use emerge::{Capabilities, RevealCallbacks, RevealEngine, RevealSpec};
//!
//! let mut engine = RevealEngine::new(Capabilities::full());
//! let spec = RevealSpec::new()
//!     .with_family("slide")
//!     .with_direction("up")
//!     .with_duration(800);
//! let handle = engine.register(element, &spec, RevealCallbacks::new());
//!
//! for effect in engine.drain_effects() {
//!     platform.execute(effect);
//! }
//! ```

pub use emerge_config as config;
pub use emerge_engine as engine;

pub use emerge_config::{
    ConfigError, Diagnostic, DiagnosticKind, Easing, Normalized, RevealConfig, RevealDirection,
    RevealFamily, RevealSpec, RootMargin, normalize, validate,
};
pub use emerge_engine::{
    Capabilities, Effect, ElementId, IntersectionRecord, RevealCallbacks, RevealEngine,
    RevealEvent, RevealHandle, RevealPhase, StyleUpdate, WatcherId,
};
