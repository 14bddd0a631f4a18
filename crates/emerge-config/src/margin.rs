//! Watch-margin values for growing or shrinking the trigger region.
//!
//! A margin expands (positive) or contracts (negative) the root's bounding
//! box before intersection is computed, so reveals can start before an
//! element is strictly on screen. Values follow the CSS shorthand rules:
//! one to four components, each in pixels or percent.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single margin component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum MarginValue {
    /// Absolute pixels. Bare numbers parse as pixels.
    Px(f64),
    /// Percentage of the root's corresponding dimension.
    Percent(f64),
}

impl Default for MarginValue {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl MarginValue {
    /// Parse a single component (`"10px"`, `"-5%"`, `"12"`).
    pub fn parse(value: &str) -> Result<Self, MarginParseError> {
        let value = value.trim();

        if let Some(number) = value.strip_suffix('%') {
            let num = number
                .parse::<f64>()
                .map_err(|_| MarginParseError::BadComponent(value.to_string()))?;
            Ok(Self::Percent(num))
        } else if let Some(number) = value.strip_suffix("px") {
            let num = number
                .parse::<f64>()
                .map_err(|_| MarginParseError::BadComponent(value.to_string()))?;
            Ok(Self::Px(num))
        } else {
            // Unitless values are treated as pixels.
            let num = value
                .parse::<f64>()
                .map_err(|_| MarginParseError::BadComponent(value.to_string()))?;
            Ok(Self::Px(num))
        }
    }

    /// Whether this component is exactly zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Px(v) | Self::Percent(v) => *v == 0.0,
        }
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{}px", px),
            Self::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

/// Reason a margin string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarginParseError {
    #[error("margin has {0} components, expected 1 to 4")]
    TooManyComponents(usize),
    #[error("invalid margin component `{0}`")]
    BadComponent(String),
}

/// Margins applied to the root's bounding box, top/right/bottom/left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl RootMargin {
    /// Parse a CSS-style margin shorthand with one to four components.
    ///
    /// An empty string yields the zero margin.
    pub fn parse(margin: &str) -> Result<Self, MarginParseError> {
        let parts: Vec<&str> = margin.split_whitespace().collect();

        match parts.len() {
            0 => Ok(Self::default()),
            1 => {
                let value = MarginValue::parse(parts[0])?;
                Ok(Self {
                    top: value,
                    right: value,
                    bottom: value,
                    left: value,
                })
            }
            2 => {
                let vertical = MarginValue::parse(parts[0])?;
                let horizontal = MarginValue::parse(parts[1])?;
                Ok(Self {
                    top: vertical,
                    right: horizontal,
                    bottom: vertical,
                    left: horizontal,
                })
            }
            3 => {
                let top = MarginValue::parse(parts[0])?;
                let horizontal = MarginValue::parse(parts[1])?;
                let bottom = MarginValue::parse(parts[2])?;
                Ok(Self {
                    top,
                    right: horizontal,
                    bottom,
                    left: horizontal,
                })
            }
            4 => Ok(Self {
                top: MarginValue::parse(parts[0])?,
                right: MarginValue::parse(parts[1])?,
                bottom: MarginValue::parse(parts[2])?,
                left: MarginValue::parse(parts[3])?,
            }),
            n => Err(MarginParseError::TooManyComponents(n)),
        }
    }

    /// The same pixel margin on all four sides, as synthesized from a
    /// trigger offset.
    pub fn symmetric_px(offset_px: i32) -> Self {
        let value = MarginValue::Px(offset_px as f64);
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Whether all four components are zero.
    pub fn is_zero(&self) -> bool {
        self.top.is_zero() && self.right.is_zero() && self.bottom.is_zero() && self.left.is_zero()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}
