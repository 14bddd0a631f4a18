//! Raw, partial reveal configuration as authored by the embedding layer.
//!
//! `RevealSpec` is the wire-facing shape: every field is optional and carries
//! the value exactly as written (strings for keywords and easing expressions,
//! raw integers for timings). Nothing here is validated; the struct exists so
//! that malformed input can survive deserialization and be handled by
//! [`normalize`](crate::normalize) (lenient) or [`validate`](crate::validate)
//! (strict) instead of failing at the serde boundary.

use serde::{Deserialize, Serialize};

/// Per-element reveal configuration with every field optional.
///
/// Missing fields fall back to the documented defaults during normalization.
/// Keyword fields (`family`, `direction`, `easing`) are kept as raw text so
/// unknown values can be reported rather than rejected by the deserializer.
///
/// # Example JSON
///
/// ```json
/// {
///   "family": "slide",
///   "direction": "left",
///   "duration_ms": 450,
///   "easing": "ease-out",
///   "once": false,
///   "mirror": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevealSpec {
    /// Animation family keyword: `fade`, `slide`, `zoom` or `flip`.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Direction keyword: `up`, `down`, `left` or `right`.
    /// Meaningful for slide/zoom/flip; fade ignores it.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,

    /// Animation duration in milliseconds.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,

    /// Delay before the animation starts, in milliseconds.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<i64>,

    /// Easing: a named token or a `cubic-bezier(..)` / `steps(..)` expression.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,

    /// Symmetric watch-margin shorthand in pixels. Ignored when
    /// `root_margin` is present.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_offset_px: Option<i32>,

    /// Explicit watch-margin string (`"10px 0px -20px 0px"`). Wins over
    /// `trigger_offset_px`.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_margin: Option<String>,

    /// Identity of the scroll container to watch against. Absent means the
    /// top-level viewport.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<u64>,

    /// Visibility ratio threshold in `[0, 1]`. Absent means the classifier
    /// falls back to the raw intersecting flag.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Animate at most once. Defaults to true.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub once: Option<bool>,

    /// Reverse to the hidden state when scrolled back out. Defaults to
    /// false, and is inert while `once` is in effect.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<bool>,
}

impl RevealSpec {
    /// Create an empty spec; normalization turns it into the default fade.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the animation family keyword.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Set the direction keyword.
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Set the duration in milliseconds.
    pub fn with_duration(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Set the start delay in milliseconds.
    pub fn with_delay(mut self, delay_ms: i64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Set the easing expression.
    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Set the symmetric trigger offset in pixels.
    pub fn with_trigger_offset(mut self, offset_px: i32) -> Self {
        self.trigger_offset_px = Some(offset_px);
        self
    }

    /// Set an explicit watch-margin string.
    pub fn with_root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = Some(margin.into());
        self
    }

    /// Watch against a specific scroll container instead of the viewport.
    pub fn with_root(mut self, root: u64) -> Self {
        self.root = Some(root);
        self
    }

    /// Set the visibility ratio threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set whether the animation runs at most once.
    pub fn with_once(mut self, once: bool) -> Self {
        self.once = Some(once);
        self
    }

    /// Set whether leaving the viewport reverses the reveal.
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Check whether every field is unset.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builder() {
        let spec = RevealSpec::new()
            .with_family("slide")
            .with_direction("left")
            .with_duration(450)
            .with_delay(50)
            .with_easing("ease-out")
            .with_once(false)
            .with_mirror(true);

        assert_eq!(spec.family.as_deref(), Some("slide"));
        assert_eq!(spec.direction.as_deref(), Some("left"));
        assert_eq!(spec.duration_ms, Some(450));
        assert_eq!(spec.delay_ms, Some(50));
        assert_eq!(spec.easing.as_deref(), Some("ease-out"));
        assert_eq!(spec.once, Some(false));
        assert_eq!(spec.mirror, Some(true));
        assert!(!spec.is_empty());
    }

    #[test]
    fn test_spec_serialization_skips_unset_fields() {
        let spec = RevealSpec::new().with_family("zoom").with_duration(800);

        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"family\":\"zoom\""));
        assert!(json.contains("\"duration_ms\":800"));
        assert!(!json.contains("direction"));
        assert!(!json.contains("mirror"));

        let parsed: RevealSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_spec_accepts_unknown_keywords() {
        // Unknown keywords must survive deserialization; they are handled by
        // normalization, not the serde layer.
        let parsed: RevealSpec =
            serde_json::from_str(r#"{"family":"wobble","direction":"sideways"}"#).unwrap();
        assert_eq!(parsed.family.as_deref(), Some("wobble"));
        assert_eq!(parsed.direction.as_deref(), Some("sideways"));
    }

    #[test]
    fn test_empty_spec_round_trip() {
        let json = serde_json::to_string(&RevealSpec::new()).unwrap();
        assert_eq!(json, "{}");
        let parsed: RevealSpec = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }
}
