//! Per-element reveal lifecycle.
//!
//! Each registration owns one [`ElementState`], a state machine with no
//! clock and no platform access: feed it a [`LifecycleEvent`], get back
//! the [`Effect`]s the embedder must execute. Any transition can be
//! exercised in a test by pushing events in order and inspecting the
//! returned effects.
//!
//! The entrance itself is a three-beat sequence:
//! 1. became visible: apply the initial style with no transition,
//!    request a frame, report the entrance started
//! 2. frame arrived: apply the animate style with its transition,
//!    schedule completion for duration plus delay
//! 3. completion elapsed: settle (strip transition and hints), report
//!    the entrance ended
//!
//! Mirrored reveals reverse on exit: pending work is cancelled, the
//! initial style is restored without a transition, and the element
//! returns to `Idle` ready to enter again.
//!
//! # Usage
//!
//! ```ignore
//! use emerge_engine::lifecycle::{ElementState, LifecycleEvent, TokenSource};
//!
//! let mut tokens = TokenSource::new();
//! let mut state = ElementState::new(handle, element, config);
//!
//! let effects = state.step(LifecycleEvent::VisibilityChanged(true), &mut tokens);
//! // effects: apply initial style, request frame, entrance-started callback
//! ```

use emerge_config::RevealConfig;

use crate::effects::{CallbackKind, Effect};
use crate::style::StyleUpdate;
use crate::types::{ElementId, FrameToken, RevealHandle, RevealPhase, TimerToken};

/// Allocator for frame and timer correlation tokens.
///
/// Tokens are never reused, so a callback arriving for cancelled or
/// superseded work can be recognized as stale and dropped.
#[derive(Debug, Default)]
pub struct TokenSource {
    next_frame: u64,
    next_timer: u64,
}

impl TokenSource {
    /// Create a new token source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh frame token.
    pub fn frame(&mut self) -> FrameToken {
        self.next_frame += 1;
        FrameToken(self.next_frame)
    }

    /// Allocate a fresh timer token.
    pub fn timer(&mut self) -> TimerToken {
        self.next_timer += 1;
        TimerToken(self.next_timer)
    }
}

/// Input that can advance an element's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The visibility classifier changed its verdict for the element.
    VisibilityChanged(bool),
    /// The frame requested at entrance start arrived.
    FrameArrived,
    /// The completion timer scheduled at animate time elapsed.
    CompletionElapsed,
    /// The embedder forced the entrance without a measurement.
    ManualTrigger,
    /// The embedder asked for a return to the pre-entrance state.
    ManualReset,
}

/// Lifecycle state for one registered element.
#[derive(Debug)]
pub struct ElementState {
    handle: RevealHandle,
    element: ElementId,
    config: RevealConfig,
    phase: RevealPhase,
    visible: bool,
    has_animated_once: bool,
    pending_frame: Option<FrameToken>,
    pending_timer: Option<TimerToken>,
}

impl ElementState {
    /// Create the state for a fresh registration. No style is applied
    /// until the first entrance begins.
    pub fn new(handle: RevealHandle, element: ElementId, config: RevealConfig) -> Self {
        Self {
            handle,
            element,
            config,
            phase: RevealPhase::Idle,
            visible: false,
            has_animated_once: false,
            pending_frame: None,
            pending_timer: None,
        }
    }

    /// Create the state for a registration that never animates: the
    /// element is settled immediately and stays that way.
    pub fn settled(handle: RevealHandle, element: ElementId, config: RevealConfig) -> Self {
        Self {
            handle,
            element,
            config,
            phase: RevealPhase::Visible,
            visible: true,
            has_animated_once: true,
            pending_frame: None,
            pending_timer: None,
        }
    }

    /// Get the registration handle.
    pub fn handle(&self) -> RevealHandle {
        self.handle
    }

    /// Get the element this state belongs to.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Get the canonical config the element was registered with.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Get the current lifecycle phase.
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Get the classifier's current verdict for the element.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Check if the element has completed an entrance since registration
    /// or the last reset.
    pub fn has_animated_once(&self) -> bool {
        self.has_animated_once
    }

    /// Get the frame token the state is waiting on, if any.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending_frame
    }

    /// Get the timer token the state is waiting on, if any.
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending_timer
    }

    /// Advance the lifecycle with one event.
    ///
    /// Returns the effects the embedder must execute, in order. Events
    /// that do not apply to the current phase (duplicate visibility
    /// verdicts, stale frames or timers) return an empty list and change
    /// nothing.
    pub fn step(&mut self, event: LifecycleEvent, tokens: &mut TokenSource) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            LifecycleEvent::VisibilityChanged(visible) => {
                self.on_visibility(visible, tokens, &mut effects);
            }
            LifecycleEvent::FrameArrived => self.on_frame(tokens, &mut effects),
            LifecycleEvent::CompletionElapsed => self.on_completion(&mut effects),
            LifecycleEvent::ManualTrigger => self.on_trigger(tokens, &mut effects),
            LifecycleEvent::ManualReset => self.on_reset(&mut effects),
        }
        effects
    }

    fn on_visibility(&mut self, visible: bool, tokens: &mut TokenSource, effects: &mut Vec<Effect>) {
        self.visible = visible;
        match (self.phase, visible) {
            (RevealPhase::Idle | RevealPhase::Hidden, true) => self.begin_enter(tokens, effects),
            (RevealPhase::Idle, false) => self.phase = RevealPhase::Hidden,
            (RevealPhase::Entering | RevealPhase::Visible, false) if self.config.mirror => {
                self.leave(effects);
            }
            // Repeated verdicts, exits without mirroring, and signals for
            // phases they cannot advance change nothing.
            _ => {}
        }
    }

    fn begin_enter(&mut self, tokens: &mut TokenSource, effects: &mut Vec<Effect>) {
        if self.has_animated_once && self.config.once {
            return;
        }
        self.phase = RevealPhase::Entering;
        let token = tokens.frame();
        self.pending_frame = Some(token);
        effects.push(Effect::ApplyStyle {
            element: self.element,
            update: StyleUpdate::initial(&self.config),
        });
        effects.push(Effect::RequestFrame { token });
        effects.push(Effect::InvokeCallback {
            handle: self.handle,
            element: self.element,
            kind: CallbackKind::EnterStart,
        });
    }

    /// Reverse out of the viewport: cancel pending work, restore the
    /// initial style without a transition, and pass through `Leaving`
    /// back to `Idle` within the same step.
    fn leave(&mut self, effects: &mut Vec<Effect>) {
        self.phase = RevealPhase::Leaving;
        self.cancel_pending(effects);
        effects.push(Effect::ApplyStyle {
            element: self.element,
            update: StyleUpdate::initial(&self.config),
        });
        self.phase = RevealPhase::Idle;
    }

    fn on_frame(&mut self, tokens: &mut TokenSource, effects: &mut Vec<Effect>) {
        if self.phase != RevealPhase::Entering || self.pending_frame.take().is_none() {
            return;
        }
        let token = tokens.timer();
        self.pending_timer = Some(token);
        effects.push(Effect::ApplyStyle {
            element: self.element,
            update: StyleUpdate::animate(&self.config),
        });
        effects.push(Effect::ScheduleCompletion {
            token,
            after_ms: self.config.total_ms(),
        });
    }

    fn on_completion(&mut self, effects: &mut Vec<Effect>) {
        if self.phase != RevealPhase::Entering || self.pending_timer.take().is_none() {
            return;
        }
        self.phase = RevealPhase::Visible;
        self.has_animated_once = true;
        effects.push(Effect::ApplyStyle {
            element: self.element,
            update: StyleUpdate::settled(),
        });
        effects.push(Effect::InvokeCallback {
            handle: self.handle,
            element: self.element,
            kind: CallbackKind::EnterEnd,
        });
    }

    /// A manual trigger starts the entrance from any phase except an
    /// entrance already in flight, visibility signal or not. The once
    /// latch still applies.
    fn on_trigger(&mut self, tokens: &mut TokenSource, effects: &mut Vec<Effect>) {
        if self.phase == RevealPhase::Entering {
            return;
        }
        self.begin_enter(tokens, effects);
    }

    fn on_reset(&mut self, effects: &mut Vec<Effect>) {
        self.cancel_pending(effects);
        self.phase = RevealPhase::Idle;
        self.visible = false;
        self.has_animated_once = false;
        effects.push(Effect::ApplyStyle {
            element: self.element,
            update: StyleUpdate::initial(&self.config),
        });
    }

    /// Cancel whichever of the frame or completion timer is pending.
    pub(crate) fn cancel_pending(&mut self, effects: &mut Vec<Effect>) {
        if let Some(token) = self.pending_frame.take() {
            effects.push(Effect::CancelFrame { token });
        }
        if let Some(token) = self.pending_timer.take() {
            effects.push(Effect::CancelCompletion { token });
        }
    }
}
