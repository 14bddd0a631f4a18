//! Declarative layer for scroll-reveal animations.
//!
//! This crate owns everything that happens before the runtime engine sees a
//! reveal: the raw authored configuration, the lenient normalization path
//! that always produces something usable, the strict validation path for
//! authoring tools, and the small expression grammars (easing, watch
//! margins) those paths share.
//!
//! # Architecture
//!
//! ```text
//! RevealSpec (raw, all-optional)
//!   ├── normalize() → RevealConfig + Vec<Diagnostic>   (runtime path)
//!   └── validate()  → Result<(), ConfigError>          (authoring path)
//! ```

pub mod config;
pub mod diagnostics;
pub mod easing;
pub mod error;
pub mod margin;
pub mod spec;

pub use config::{
    DEFAULT_DELAY_MS, DEFAULT_DURATION_MS, DELAY_RANGE_MS, DURATION_RANGE_MS, Normalized,
    RevealConfig, RevealDirection, RevealFamily, normalize, validate,
};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use easing::{Easing, EasingParse, EasingParseError, StepPosition};
pub use error::{ConfigError, Result};
pub use margin::{MarginParseError, MarginValue, RootMargin};
pub use spec::RevealSpec;
