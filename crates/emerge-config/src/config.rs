//! Canonical reveal configuration and the two conversion paths that produce
//! it from raw input.
//!
//! - [`normalize`] is lenient: it always yields a usable [`RevealConfig`],
//!   substituting defaults and clamping ranges, and reports every correction
//!   as a [`Diagnostic`].
//! - [`validate`] is strict: it checks the same rules but returns the first
//!   violation as a [`ConfigError`] instead of correcting it, for authoring
//!   tools that want malformed input surfaced.
//!
//! The runtime always goes through [`normalize`]; a malformed spec can slow
//! a reveal down to the defaults but can never disable the engine.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::easing::Easing;
use crate::error::{ConfigError, Result};
use crate::margin::RootMargin;
use crate::spec::RevealSpec;

/// Allowed animation duration, milliseconds.
pub const DURATION_RANGE_MS: RangeInclusive<i64> = 100..=3000;
/// Allowed start delay, milliseconds.
pub const DELAY_RANGE_MS: RangeInclusive<i64> = 0..=2000;
/// Duration used when none is supplied.
pub const DEFAULT_DURATION_MS: u32 = 600;
/// Delay used when none is supplied.
pub const DEFAULT_DELAY_MS: u32 = 0;

/// Animation family: the visual shape of a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealFamily {
    /// Opacity only. The transform stays at a GPU-layer hint identity.
    #[default]
    Fade,
    /// Fade plus a 30px translation toward the resting position.
    Slide,
    /// Fade plus a scale toward 1.0.
    Zoom,
    /// Fade plus a perspective rotation from edge-on to flat.
    Flip,
}

impl RevealFamily {
    /// Parse a family keyword, case-insensitively.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "fade" => Some(Self::Fade),
            "slide" => Some(Self::Slide),
            "zoom" => Some(Self::Zoom),
            "flip" => Some(Self::Flip),
            _ => None,
        }
    }

    /// Whether this family structurally animates along an axis.
    /// Slide and flip are meaningless without one; zoom merely defaults.
    pub fn requires_direction(&self) -> bool {
        matches!(self, Self::Slide | Self::Flip)
    }

    /// Whether a direction affects this family at all.
    pub fn uses_direction(&self) -> bool {
        !matches!(self, Self::Fade)
    }
}

impl fmt::Display for RevealFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::Zoom => "zoom",
            Self::Flip => "flip",
        })
    }
}

/// Direction a slide, zoom or flip animates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl RevealDirection {
    /// Parse a direction keyword, case-insensitively.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

impl fmt::Display for RevealDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Canonical, always-usable reveal configuration.
///
/// Produced by [`normalize`]; every field is in range and every keyword is
/// resolved. The engine consumes this type directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Visual family of the reveal.
    pub family: RevealFamily,

    /// Axis for slide/zoom/flip. Always `Some` for slide and flip after
    /// normalization; `None` on zoom means the axis-free scale-up; always
    /// `None` for fade.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<RevealDirection>,

    /// Animation duration in milliseconds, within [`DURATION_RANGE_MS`].
    pub duration_ms: u32,

    /// Start delay in milliseconds, within [`DELAY_RANGE_MS`].
    pub delay_ms: u32,

    /// Timing function attached to the animate-phase transition.
    pub easing: Easing,

    /// Symmetric watch-margin shorthand in pixels.
    pub trigger_offset_px: i32,

    /// Explicit watch margin. Wins over `trigger_offset_px` when present.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_margin: Option<RootMargin>,

    /// Scroll container to watch against; `None` means the viewport.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<u64>,

    /// Visibility ratio threshold in `[0, 1]`; `None` falls back to the raw
    /// intersecting flag.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Animate at most once.
    pub once: bool,

    /// Reverse when scrolled back out. Never true together with `once`;
    /// normalization neutralizes that contradiction in favor of `once`.
    pub mirror: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            family: RevealFamily::Fade,
            direction: None,
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: DEFAULT_DELAY_MS,
            easing: Easing::Ease,
            trigger_offset_px: 0,
            root_margin: None,
            root: None,
            threshold: None,
            once: true,
            mirror: false,
        }
    }
}

impl RevealConfig {
    /// Milliseconds from the animate-phase application until the reveal
    /// settles: transition duration plus start delay.
    pub fn total_ms(&self) -> u32 {
        self.duration_ms + self.delay_ms
    }

    /// The watch margin in effect: the explicit margin when present,
    /// otherwise symmetric from the trigger offset.
    pub fn effective_margin(&self) -> RootMargin {
        self.root_margin
            .unwrap_or_else(|| RootMargin::symmetric_px(self.trigger_offset_px))
    }
}

/// Result of lenient normalization: the canonical config plus every
/// correction that was applied to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub config: RevealConfig,
    pub diagnostics: Vec<Diagnostic>,
}

impl Normalized {
    /// True when the spec normalized without any correction.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Convert a raw spec into a canonical config, correcting as needed.
///
/// Never fails: unknown keywords fall back to defaults, out-of-range values
/// clamp, malformed expressions are replaced. Each correction produces one
/// [`Diagnostic`] (also logged through `log::warn!`).
pub fn normalize(spec: &RevealSpec) -> Normalized {
    let mut diagnostics = Vec::new();

    let family = match spec.family.as_deref() {
        None => RevealFamily::default(),
        Some(raw) => RevealFamily::parse(raw).unwrap_or_else(|| {
            diagnostics.push(Diagnostic::new(
                "family",
                DiagnosticKind::UnknownKeyword,
                format!("`{raw}` is not an animation family; using `fade`"),
            ));
            RevealFamily::Fade
        }),
    };

    let direction = normalize_direction(family, spec.direction.as_deref(), &mut diagnostics);
    let duration_ms = normalize_range(
        "duration_ms",
        spec.duration_ms,
        DURATION_RANGE_MS,
        DEFAULT_DURATION_MS,
        &mut diagnostics,
    );
    let delay_ms = normalize_range(
        "delay_ms",
        spec.delay_ms,
        DELAY_RANGE_MS,
        DEFAULT_DELAY_MS,
        &mut diagnostics,
    );

    let easing = match spec.easing.as_deref() {
        None => Easing::default(),
        Some(raw) => match Easing::parse(raw) {
            Ok(parsed) => {
                if parsed.x_out_of_range {
                    diagnostics.push(Diagnostic::new(
                        "easing",
                        DiagnosticKind::OutOfRange,
                        format!("`{raw}` has bezier x components outside [0, 1]"),
                    ));
                }
                parsed.easing
            }
            Err(err) => {
                diagnostics.push(Diagnostic::new(
                    "easing",
                    DiagnosticKind::MalformedExpression,
                    format!("{err}; using `ease`"),
                ));
                Easing::default()
            }
        },
    };

    let root_margin = match spec.root_margin.as_deref() {
        None => None,
        Some(raw) => match RootMargin::parse(raw) {
            Ok(margin) => Some(margin),
            Err(err) => {
                diagnostics.push(Diagnostic::new(
                    "root_margin",
                    DiagnosticKind::MalformedExpression,
                    format!("{err}; falling back to the trigger offset"),
                ));
                None
            }
        },
    };

    let threshold = match spec.threshold {
        None => None,
        Some(raw) if !raw.is_finite() => {
            diagnostics.push(Diagnostic::new(
                "threshold",
                DiagnosticKind::OutOfRange,
                format!("`{raw}` is not a finite ratio; ignoring"),
            ));
            None
        }
        Some(raw) if (0.0..=1.0).contains(&raw) => Some(raw),
        Some(raw) => {
            let clamped = raw.clamp(0.0, 1.0);
            diagnostics.push(Diagnostic::new(
                "threshold",
                DiagnosticKind::OutOfRange,
                format!("{raw} clamped to {clamped}"),
            ));
            Some(clamped)
        }
    };

    let once = spec.once.unwrap_or(true);
    let mut mirror = spec.mirror.unwrap_or(false);
    if once && mirror {
        diagnostics.push(Diagnostic::new(
            "mirror",
            DiagnosticKind::Contradiction,
            "mirror has no effect while once is in force; disabling mirror",
        ));
        mirror = false;
    }

    Normalized {
        config: RevealConfig {
            family,
            direction,
            duration_ms,
            delay_ms,
            easing,
            trigger_offset_px: spec.trigger_offset_px.unwrap_or(0),
            root_margin,
            root: spec.root,
            threshold,
            once,
            mirror,
        },
        diagnostics,
    }
}

fn normalize_direction(
    family: RevealFamily,
    raw: Option<&str>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<RevealDirection> {
    match raw {
        Some(text) => match RevealDirection::parse(text) {
            Some(direction) if family.uses_direction() => Some(direction),
            Some(direction) => {
                diagnostics.push(Diagnostic::new(
                    "direction",
                    DiagnosticKind::IgnoredField,
                    format!("family `{family}` does not use a direction; ignoring `{direction}`"),
                ));
                None
            }
            None if family.requires_direction() => {
                diagnostics.push(Diagnostic::new(
                    "direction",
                    DiagnosticKind::UnknownKeyword,
                    format!("`{text}` is not a direction; using `up`"),
                ));
                Some(RevealDirection::default())
            }
            None => {
                diagnostics.push(Diagnostic::new(
                    "direction",
                    DiagnosticKind::UnknownKeyword,
                    format!("`{text}` is not a direction; ignoring"),
                ));
                None
            }
        },
        None if family.requires_direction() => {
            diagnostics.push(Diagnostic::new(
                "direction",
                DiagnosticKind::MissingKeyword,
                format!("family `{family}` animates along an axis; using `up`"),
            ));
            Some(RevealDirection::default())
        }
        None => None,
    }
}

fn normalize_range(
    field: &'static str,
    raw: Option<i64>,
    range: RangeInclusive<i64>,
    default: u32,
    diagnostics: &mut Vec<Diagnostic>,
) -> u32 {
    match raw {
        None => default,
        Some(value) if range.contains(&value) => value as u32,
        Some(value) => {
            let clamped = value.clamp(*range.start(), *range.end());
            diagnostics.push(Diagnostic::new(
                field,
                DiagnosticKind::OutOfRange,
                format!("{value} clamped to {clamped}"),
            ));
            clamped as u32
        }
    }
}

/// Check a raw spec strictly, reporting the first violated constraint.
///
/// Field order: family, direction, duration, delay, easing. Direction is
/// only constrained for slide and flip, the families that structurally
/// need an axis; stray direction text on fade or zoom is cosmetic, at
/// most a diagnostic under [`normalize`]. Out-of-range bezier x
/// components are likewise accepted (another normalize diagnostic); so
/// are margin and threshold oddities, which always have lenient
/// fallbacks.
pub fn validate(spec: &RevealSpec) -> Result<()> {
    let family = match spec.family.as_deref() {
        None => RevealFamily::default(),
        Some(raw) => {
            RevealFamily::parse(raw).ok_or_else(|| ConfigError::InvalidFamily(raw.to_string()))?
        }
    };

    if family.requires_direction() {
        match spec.direction.as_deref() {
            Some(raw) if RevealDirection::parse(raw).is_some() => {}
            supplied => {
                return Err(ConfigError::InvalidDirectionContext {
                    family: family.to_string(),
                    direction: supplied.map(str::to_string),
                });
            }
        }
    }

    if let Some(raw) = spec.duration_ms {
        if !DURATION_RANGE_MS.contains(&raw) {
            return Err(ConfigError::DurationOutOfRange(raw));
        }
    }
    if let Some(raw) = spec.delay_ms {
        if !DELAY_RANGE_MS.contains(&raw) {
            return Err(ConfigError::DelayOutOfRange(raw));
        }
    }

    if let Some(raw) = spec.easing.as_deref() {
        Easing::parse(raw).map_err(|err| ConfigError::MalformedEasing(raw.to_string(), err))?;
    }

    Ok(())
}
