//! Pure style computation for the reveal families.
//!
//! Every function here is a total function from (family, direction, phase)
//! to concrete style values; nothing reads clocks, elements or engine
//! state. The engine decides *when* styles apply, this module decides
//! *what* they are.
//!
//! Two phases exist per reveal:
//! - `Initial`: the hidden pose an element snaps to before animating
//!   (opacity 0 plus the family's offset/scale/rotation).
//! - `Animate`: the shown pose the transition runs toward (opacity 1,
//!   neutral transform).
//!
//! The settled state after completion is a third, phase-less style: fully
//! visible with the transition string and GPU hints stripped, so a resting
//! element carries no animation residue.

use emerge_config::{Easing, RevealConfig, RevealDirection, RevealFamily};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance a slide travels from its initial offset to rest.
pub const SLIDE_DISTANCE_PX: f32 = 30.0;
/// Zoom starting scale for `up`, `left`, `right` and axis-free zooms.
pub const ZOOM_SCALE_IN: f32 = 0.8;
/// Zoom starting scale for `down`.
pub const ZOOM_SCALE_OUT: f32 = 1.2;
/// Magnitude of a flip's starting rotation.
pub const FLIP_ANGLE_DEG: f32 = 90.0;
/// Perspective applied to flip rotations.
pub const FLIP_PERSPECTIVE_PX: f32 = 2500.0;

/// Which endpoint of a reveal a computed style describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylePhase {
    /// Hidden pose applied synchronously before the entrance.
    Initial,
    /// Shown pose the transition animates toward.
    Animate,
}

/// Axis of a translation or rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// A reveal transform, kept symbolic so embedders can render it to CSS or
/// map it onto their own transform stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealTransform {
    /// No visual change; rendered as a GPU-layer hint (`translateZ(0)`).
    Identity,
    /// Translation along one axis, in pixels.
    Translate { axis: Axis, px: f32 },
    /// Uniform scale about the element's center.
    Scale { factor: f32 },
    /// Perspective rotation about one axis, in degrees.
    Flip { axis: Axis, degrees: f32 },
}

impl RevealTransform {
    /// Render to a CSS transform value.
    pub fn to_css(&self) -> String {
        match self {
            Self::Identity => "translateZ(0)".to_string(),
            Self::Translate { axis: Axis::X, px } => format!("translate3d({px}px, 0, 0)"),
            Self::Translate { axis: Axis::Y, px } => format!("translate3d(0, {px}px, 0)"),
            Self::Scale { factor } => format!("scale({factor})"),
            Self::Flip { axis: Axis::X, degrees } => {
                format!("perspective({FLIP_PERSPECTIVE_PX}px) rotateX({degrees}deg)")
            }
            Self::Flip { axis: Axis::Y, degrees } => {
                format!("perspective({FLIP_PERSPECTIVE_PX}px) rotateY({degrees}deg)")
            }
        }
    }
}

/// GPU-hint properties that accompany an active animation and are stripped
/// once the element settles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleHints {
    /// Promote opacity/transform changes to their own layer.
    pub will_change: bool,
    /// Hide the back face during perspective rotation (flip only).
    pub backface_hidden: bool,
}

impl StyleHints {
    /// The `will-change` value to set, if any.
    pub fn will_change_css(&self) -> Option<&'static str> {
        self.will_change.then_some("opacity, transform")
    }
}

/// Style values for one phase of one reveal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub opacity: f32,
    pub transform: RevealTransform,
    pub hints: StyleHints,
}

/// Compute the style for a family/direction at a phase.
///
/// Total over all inputs: fade ignores the direction, zoom treats a missing
/// direction as the axis-free scale-up, and slide/flip (whose directions
/// are guaranteed by normalization) fall back to `up`.
pub fn style_for(
    family: RevealFamily,
    direction: Option<RevealDirection>,
    phase: StylePhase,
) -> ComputedStyle {
    let opacity = match phase {
        StylePhase::Initial => 0.0,
        StylePhase::Animate => 1.0,
    };

    let transform = match family {
        RevealFamily::Fade => RevealTransform::Identity,
        RevealFamily::Slide => slide_transform(direction.unwrap_or_default(), phase),
        RevealFamily::Zoom => zoom_transform(direction, phase),
        RevealFamily::Flip => flip_transform(direction.unwrap_or_default(), phase),
    };

    ComputedStyle {
        opacity,
        transform,
        hints: StyleHints {
            will_change: true,
            backface_hidden: family == RevealFamily::Flip,
        },
    }
}

/// Slide offsets animate toward zero. The named direction is the direction
/// the element travels: `up` and `left` start from positive displacements,
/// `down` and `right` from negative ones.
fn slide_transform(direction: RevealDirection, phase: StylePhase) -> RevealTransform {
    let (axis, sign) = match direction {
        RevealDirection::Up => (Axis::Y, 1.0),
        RevealDirection::Down => (Axis::Y, -1.0),
        RevealDirection::Left => (Axis::X, 1.0),
        RevealDirection::Right => (Axis::X, -1.0),
    };
    let px = match phase {
        StylePhase::Initial => sign * SLIDE_DISTANCE_PX,
        StylePhase::Animate => 0.0,
    };
    RevealTransform::Translate { axis, px }
}

fn zoom_transform(direction: Option<RevealDirection>, phase: StylePhase) -> RevealTransform {
    let factor = match phase {
        StylePhase::Initial => match direction {
            Some(RevealDirection::Down) => ZOOM_SCALE_OUT,
            _ => ZOOM_SCALE_IN,
        },
        StylePhase::Animate => 1.0,
    };
    RevealTransform::Scale { factor }
}

/// Flips start edge-on and rotate flat: `up`/`down` about the X axis at
/// +90/-90 degrees, `left`/`right` about the Y axis at -90/+90.
fn flip_transform(direction: RevealDirection, phase: StylePhase) -> RevealTransform {
    let (axis, degrees) = match direction {
        RevealDirection::Up => (Axis::X, FLIP_ANGLE_DEG),
        RevealDirection::Down => (Axis::X, -FLIP_ANGLE_DEG),
        RevealDirection::Left => (Axis::Y, -FLIP_ANGLE_DEG),
        RevealDirection::Right => (Axis::Y, FLIP_ANGLE_DEG),
    };
    let degrees = match phase {
        StylePhase::Initial => degrees,
        StylePhase::Animate => 0.0,
    };
    RevealTransform::Flip { axis, degrees }
}

/// The transition attached while an entrance is animating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionStyle {
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
}

impl TransitionStyle {
    /// Build from a canonical config's timing fields.
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            duration_ms: config.duration_ms,
            delay_ms: config.delay_ms,
            easing: config.easing,
        }
    }
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "opacity {d}ms {e} {delay}ms, transform {d}ms {e} {delay}ms",
            d = self.duration_ms,
            e = self.easing,
            delay = self.delay_ms,
        )
    }
}

/// A concrete style write for one element.
///
/// `None` for an optional property means "clear it": the settled state
/// removes the transform, transition and hints a finished reveal no longer
/// needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleUpdate {
    pub opacity: f32,
    pub transform: Option<RevealTransform>,
    pub transition: Option<TransitionStyle>,
    pub hints: StyleHints,
}

impl StyleUpdate {
    /// The hidden pose, applied synchronously with no transition so the
    /// jump to it never animates.
    pub fn initial(config: &RevealConfig) -> Self {
        let style = style_for(config.family, config.direction, StylePhase::Initial);
        Self {
            opacity: style.opacity,
            transform: Some(style.transform),
            transition: None,
            hints: style.hints,
        }
    }

    /// The shown pose with the transition attached; applying it starts the
    /// visual entrance.
    pub fn animate(config: &RevealConfig) -> Self {
        let style = style_for(config.family, config.direction, StylePhase::Animate);
        Self {
            opacity: style.opacity,
            transform: Some(style.transform),
            transition: Some(TransitionStyle::from_config(config)),
            hints: style.hints,
        }
    }

    /// The resting state after completion: fully visible, with transition
    /// and GPU hints stripped.
    pub fn settled() -> Self {
        Self {
            opacity: 1.0,
            transform: None,
            transition: None,
            hints: StyleHints::default(),
        }
    }
}
