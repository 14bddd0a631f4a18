//! Easing expressions for reveal timing.
//!
//! This module models CSS-compatible timing functions:
//! - Linear
//! - Ease, EaseIn, EaseOut, EaseInOut (standard CSS curves)
//! - CubicBezier (custom bezier curves)
//! - Steps (stepped animations)
//!
//! The engine never evaluates these numerically; interpolation is delegated
//! to the rendering layer's transition mechanism. What this module owns is
//! the round trip between authored CSS text and the typed representation:
//! parsing on the way in, canonical formatting on the way out (for the
//! transition strings attached during the animate phase).
//!
//! # Usage
//!
//! ```
//! use emerge_config::easing::Easing;
//!
//! let parsed = Easing::parse("cubic-bezier(0.4, 0, 0.2, 1)").unwrap();
//! assert_eq!(
//!     parsed.easing,
//!     Easing::CubicBezier { x1: 0.4, y1: 0.0, x2: 0.2, y2: 1.0 }
//! );
//! assert_eq!(parsed.easing.to_string(), "cubic-bezier(0.4, 0, 0.2, 1)");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position for stepped timing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Jump at the start of each interval (CSS `jump-start` / `start`).
    Start,
    /// Jump at the end of each interval (CSS `jump-end` / `end`).
    End,
    /// Jump at both start and end (CSS `jump-both`).
    Both,
    /// No jump at start or end (CSS `jump-none`).
    None,
}

impl Default for StepPosition {
    fn default() -> Self {
        Self::End
    }
}

impl StepPosition {
    /// The CSS keyword used when rendering a `steps(..)` expression.
    pub fn css_keyword(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Both => "jump-both",
            Self::None => "jump-none",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "start" | "jump-start" => Some(Self::Start),
            "end" | "jump-end" => Some(Self::End),
            "jump-both" => Some(Self::Both),
            "jump-none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Timing function attached to a reveal's transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,

    /// CSS `ease` - Slow start, fast middle, slow end.
    /// Equivalent to `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,

    /// CSS `ease-in` - Slow start, accelerating.
    /// Equivalent to `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,

    /// CSS `ease-out` - Fast start, decelerating.
    /// Equivalent to `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,

    /// CSS `ease-in-out` - Slow start and end, fast middle.
    /// Equivalent to `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,

    /// Custom cubic bezier curve.
    /// Parameters: (x1, y1, x2, y2) - control points.
    /// x values are expected in [0, 1]; y values can be any float.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// Stepped timing with discrete jumps.
    /// `count` is the number of intervals (must be >= 1).
    Steps { count: u32, position: StepPosition },
}

impl Default for Easing {
    fn default() -> Self {
        Self::Ease
    }
}

/// Outcome of parsing an easing expression.
///
/// Bezier x-components outside `[0, 1]` parse successfully but are flagged
/// so normalization can surface a diagnostic without rejecting the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasingParse {
    pub easing: Easing,
    pub x_out_of_range: bool,
}

impl EasingParse {
    fn plain(easing: Easing) -> Self {
        Self {
            easing,
            x_out_of_range: false,
        }
    }
}

/// Reason an easing expression failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EasingParseError {
    #[error("unknown easing token `{0}`")]
    UnknownToken(String),
    #[error("`{0}` is missing its closing parenthesis")]
    MissingClosingParen(String),
    #[error("cubic-bezier takes exactly 4 arguments, got {0}")]
    BezierArity(usize),
    #[error("non-numeric cubic-bezier component `{0}`")]
    NonNumericComponent(String),
    #[error("steps takes 1 or 2 arguments, got {0}")]
    StepsArity(usize),
    #[error("step count must be an integer >= 1, got `{0}`")]
    BadStepCount(String),
    #[error("unknown step position `{0}`")]
    UnknownStepPosition(String),
}

impl Easing {
    /// Parse a CSS easing expression.
    ///
    /// Accepts the named tokens (`linear`, `ease`, `ease-in`, `ease-out`,
    /// `ease-in-out`), `cubic-bezier(x1, y1, x2, y2)` with exactly four
    /// numeric components, and `steps(count)` / `steps(count, position)`.
    /// Matching is case-insensitive and tolerant of surrounding whitespace.
    pub fn parse(text: &str) -> Result<EasingParse, EasingParseError> {
        let lowered = text.trim().to_ascii_lowercase();

        match lowered.as_str() {
            "linear" => return Ok(EasingParse::plain(Self::Linear)),
            "ease" => return Ok(EasingParse::plain(Self::Ease)),
            "ease-in" => return Ok(EasingParse::plain(Self::EaseIn)),
            "ease-out" => return Ok(EasingParse::plain(Self::EaseOut)),
            "ease-in-out" => return Ok(EasingParse::plain(Self::EaseInOut)),
            _ => {}
        }

        if let Some(inner) = strip_function(&lowered, "cubic-bezier")? {
            return parse_bezier_args(inner);
        }
        if let Some(inner) = strip_function(&lowered, "steps")? {
            return parse_steps_args(inner);
        }

        Err(EasingParseError::UnknownToken(lowered))
    }

    /// Create a custom cubic bezier easing.
    ///
    /// # Panics
    /// Panics if x1 or x2 are outside [0, 1]. Use [`Easing::parse`] for
    /// authored input, where out-of-range x-components are flagged instead.
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Create a stepped easing.
    ///
    /// # Panics
    /// Panics if steps is 0.
    pub fn steps(steps: u32, position: StepPosition) -> Self {
        assert!(steps >= 1, "Steps must be at least 1");
        Self::Steps {
            count: steps,
            position,
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Ease => f.write_str("ease"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            Self::Steps { count, position } => {
                write!(f, "steps({}, {})", count, position.css_keyword())
            }
        }
    }
}

/// Peel `name(args)` off an expression, insisting on the closing parenthesis.
///
/// Returns `Ok(None)` when the text does not start with `name(` at all, so
/// the caller can try the next function form.
fn strip_function<'a>(
    text: &'a str,
    name: &str,
) -> Result<Option<&'a str>, EasingParseError> {
    let Some(rest) = text.strip_prefix(name) else {
        return Ok(None);
    };
    let Some(rest) = rest.strip_prefix('(') else {
        return Ok(None);
    };
    match rest.strip_suffix(')') {
        Some(inner) => Ok(Some(inner)),
        None => Err(EasingParseError::MissingClosingParen(text.to_string())),
    }
}

fn parse_bezier_args(inner: &str) -> Result<EasingParse, EasingParseError> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(EasingParseError::BezierArity(parts.len()));
    }

    let mut values = [0.0f32; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f32>()
            .map_err(|_| EasingParseError::NonNumericComponent(part.to_string()))?;
    }

    let [x1, y1, x2, y2] = values;
    let x_out_of_range = !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2);
    Ok(EasingParse {
        easing: Easing::CubicBezier { x1, y1, x2, y2 },
        x_out_of_range,
    })
}

fn parse_steps_args(inner: &str) -> Result<EasingParse, EasingParseError> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() > 2 {
        return Err(EasingParseError::StepsArity(parts.len()));
    }

    let count = parts[0]
        .parse::<u32>()
        .map_err(|_| EasingParseError::BadStepCount(parts[0].to_string()))?;
    if count == 0 {
        return Err(EasingParseError::BadStepCount(parts[0].to_string()));
    }

    let position = match parts.get(1) {
        Some(keyword) => StepPosition::from_keyword(keyword)
            .ok_or_else(|| EasingParseError::UnknownStepPosition(keyword.to_string()))?,
        None => StepPosition::default(),
    };

    Ok(EasingParse::plain(Easing::Steps { count, position }))
}
