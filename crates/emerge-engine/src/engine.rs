//! Reveal engine coordinating the pool, per-element lifecycles, and events.
//!
//! The `RevealEngine` is the single entry point for embedders. It handles:
//! - Registering elements with a raw spec (normalized internally)
//! - Sharing platform watchers between registrations via the pool
//! - Classifying intersection measurements and advancing lifecycles
//! - Routing frame and timer callbacks back to the element that asked
//! - Queueing platform instructions and lifecycle events for draining
//!
//! The engine never touches the platform. Everything it wants done comes
//! out of [`drain_effects`](RevealEngine::drain_effects) as an ordered
//! instruction stream; everything that happened comes out of
//! [`drain_events`](RevealEngine::drain_events) and the per-registration
//! callbacks.
//!
//! # Usage
//!
//! ```ignore
//! use emerge_engine::{Capabilities, RevealCallbacks, RevealEngine};
//! use emerge_config::RevealSpec;
//!
//! let mut engine = RevealEngine::new(Capabilities::full());
//! let handle = engine.register(
//!     element,
//!     &RevealSpec::new().with_family("slide").with_direction("up"),
//!     RevealCallbacks::new(),
//! );
//!
//! // Execute the queued instructions against the platform...
//! for effect in engine.drain_effects() {
//!     platform.execute(effect);
//! }
//!
//! // ...and feed platform callbacks back in.
//! engine.deliver_intersections(watcher, &records);
//! engine.frame_fired(token);
//! engine.timer_fired(token);
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;

use emerge_config::{RevealConfig, RevealSpec, normalize};

use crate::effects::Effect;
use crate::events::{EventQueue, RevealCallbacks, RevealEvent};
use crate::lifecycle::{ElementState, LifecycleEvent, TokenSource};
use crate::style::StyleUpdate;
use crate::types::{
    Capabilities, ElementId, FrameToken, IntersectionRecord, RevealHandle, RevealPhase, TimerToken,
    WatcherId,
};
use crate::visibility::should_be_visible;
use crate::watcher::{WatchOptions, WatcherPool};

/// Central coordinator for all scroll reveals.
pub struct RevealEngine {
    /// Platform abilities probed once at construction.
    capabilities: Capabilities,

    /// Shared watchers keyed by watch conditions.
    pool: WatcherPool,

    /// Lifecycle state per registration.
    states: HashMap<RevealHandle, ElementState>,

    /// Index from element to its live registration.
    by_element: HashMap<ElementId, RevealHandle>,

    /// Outstanding frame requests, routed back by token.
    frames: HashMap<FrameToken, RevealHandle>,

    /// Outstanding completion timers, routed back by token.
    timers: HashMap<TimerToken, RevealHandle>,

    /// Per-registration lifecycle callbacks.
    callbacks: HashMap<RevealHandle, RevealCallbacks>,

    /// Token allocator shared by every lifecycle.
    tokens: TokenSource,

    /// Platform instructions queued for the embedder, in execution order.
    effects: VecDeque<Effect>,

    /// Lifecycle events queued for polling.
    events: EventQueue,

    /// Probe for whether an element is still attached; consulted before a
    /// completion is made visible to the embedder.
    liveness: Box<dyn Fn(ElementId) -> bool + Send>,
}

impl RevealEngine {
    /// Create an engine for the probed platform capabilities.
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            pool: WatcherPool::new(),
            states: HashMap::new(),
            by_element: HashMap::new(),
            frames: HashMap::new(),
            timers: HashMap::new(),
            callbacks: HashMap::new(),
            tokens: TokenSource::new(),
            effects: VecDeque::new(),
            events: EventQueue::new(),
            liveness: Box::new(|_| true),
        }
    }

    /// Replace the liveness probe.
    ///
    /// The default probe treats every element as attached. An embedder
    /// that can cheaply check for detached elements should install one so
    /// completions for removed elements are dropped instead of styled.
    pub fn with_liveness_probe(
        mut self,
        probe: impl Fn(ElementId) -> bool + Send + 'static,
    ) -> Self {
        self.liveness = Box::new(probe);
        self
    }

    /// Get the capabilities the engine was built with.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Check if entrances animate at all.
    ///
    /// False when the platform has no watcher support or the user prefers
    /// reduced motion; registrations then settle immediately.
    pub fn animations_enabled(&self) -> bool {
        self.capabilities.animations_enabled()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register an element for a scroll reveal.
    ///
    /// The raw spec is normalized internally and never rejected; malformed
    /// fields fall back to documented defaults with logged diagnostics.
    /// Re-registering a live element replaces the prior registration and
    /// its handle becomes stale.
    ///
    /// # Returns
    /// The handle identifying this registration.
    pub fn register(
        &mut self,
        element: ElementId,
        spec: &RevealSpec,
        callbacks: RevealCallbacks,
    ) -> RevealHandle {
        let normalized = normalize(spec);
        self.register_config(element, normalized.config, callbacks)
    }

    /// Register an element with an already-canonical config.
    pub fn register_config(
        &mut self,
        element: ElementId,
        config: RevealConfig,
        callbacks: RevealCallbacks,
    ) -> RevealHandle {
        if let Some(&prior) = self.by_element.get(&element) {
            self.unregister(prior);
        }

        let handle = RevealHandle::new();
        log::debug!("register: element={:?} handle={:?}", element, handle);

        if !self.animations_enabled() {
            // Reduced motion or no watcher support: the element settles
            // fully visible at once and the pool is never touched.
            self.states
                .insert(handle, ElementState::settled(handle, element, config));
            self.by_element.insert(element, handle);
            self.callbacks.insert(handle, callbacks);
            self.effects.push_back(Effect::ApplyStyle {
                element,
                update: StyleUpdate::settled(),
            });
            return handle;
        }

        let options = WatchOptions::from_config(&config);
        self.states
            .insert(handle, ElementState::new(handle, element, config));
        self.by_element.insert(element, handle);
        self.callbacks.insert(handle, callbacks);

        let mut effects = Vec::new();
        self.pool.observe(element, options, &mut effects);
        self.route_effects(handle, effects);

        handle
    }

    /// Remove a registration.
    ///
    /// Cancels any pending frame or timer, releases the watcher
    /// observation, and drops queued events for the handle. After this
    /// returns, no callback and no event for the registration can be
    /// delivered. Returns `false` if the handle was already gone.
    pub fn unregister(&mut self, handle: RevealHandle) -> bool {
        let Some(mut state) = self.states.remove(&handle) else {
            return false;
        };
        let element = state.element();
        log::debug!("unregister: handle={:?} element={:?}", handle, element);

        let mut effects = Vec::new();
        state.cancel_pending(&mut effects);
        if self.by_element.get(&element) == Some(&handle) {
            self.by_element.remove(&element);
            self.pool.unobserve(element, &mut effects);
        }
        self.callbacks.remove(&handle);
        self.events.remove_for_handle(handle);
        self.route_effects(handle, effects);
        true
    }

    // ========================================================================
    // Manual controls
    // ========================================================================

    /// Force the entrance for a registration, as if the watcher had
    /// reported it visible. Works regardless of the actual visibility
    /// signal and subject to the `once` latch; an entrance already in
    /// flight is left to finish.
    pub fn trigger(&mut self, handle: RevealHandle) {
        self.dispatch(handle, LifecycleEvent::ManualTrigger);
    }

    /// Return a registration to its pre-entrance state: pending work is
    /// cancelled, the initial style is re-applied, and the `once` latch is
    /// cleared so the element can animate again.
    pub fn reset(&mut self, handle: RevealHandle) {
        self.dispatch(handle, LifecycleEvent::ManualReset);
    }

    fn dispatch(&mut self, handle: RevealHandle, event: LifecycleEvent) {
        if !self.animations_enabled() {
            return;
        }
        let Some(state) = self.states.get_mut(&handle) else {
            return;
        };
        let effects = state.step(event, &mut self.tokens);
        self.route_effects(handle, effects);
    }

    // ========================================================================
    // Platform inputs
    // ========================================================================

    /// Feed a measurement batch reported by one watcher.
    ///
    /// Each record is demultiplexed to its member element, classified with
    /// hysteresis against that element's threshold, and applied to its
    /// lifecycle. Records for unknown watchers or non-members are dropped.
    pub fn deliver_intersections(&mut self, watcher: WatcherId, records: &[IntersectionRecord]) {
        if !self.animations_enabled() {
            return;
        }
        for record in self.pool.deliver(watcher, records) {
            let Some(&handle) = self.by_element.get(&record.target) else {
                continue;
            };
            let Some(state) = self.states.get_mut(&handle) else {
                continue;
            };
            let visible = should_be_visible(&record, state.config().threshold, state.is_visible());
            let effects = state.step(LifecycleEvent::VisibilityChanged(visible), &mut self.tokens);
            self.route_effects(handle, effects);
        }
    }

    /// Feed the arrival of a requested frame.
    ///
    /// Tokens for cancelled or superseded requests are ignored silently.
    pub fn frame_fired(&mut self, token: FrameToken) {
        let Some(handle) = self.frames.remove(&token) else {
            return;
        };
        self.dispatch(handle, LifecycleEvent::FrameArrived);
    }

    /// Feed the expiry of a scheduled completion timer.
    ///
    /// Tokens for cancelled timers are ignored silently. If the liveness
    /// probe reports the element detached, the lifecycle still advances to
    /// `Visible` but no style is applied and no completion is reported.
    pub fn timer_fired(&mut self, token: TimerToken) {
        let Some(handle) = self.timers.remove(&token) else {
            return;
        };
        let Some(state) = self.states.get_mut(&handle) else {
            return;
        };
        let element = state.element();
        let effects = state.step(LifecycleEvent::CompletionElapsed, &mut self.tokens);
        if !(self.liveness)(element) {
            log::debug!("timer_fired: element={:?} detached, completion dropped", element);
            return;
        }
        self.route_effects(handle, effects);
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Get the lifecycle phase for a registration.
    pub fn phase(&self, handle: RevealHandle) -> Option<RevealPhase> {
        self.states.get(&handle).map(|state| state.phase())
    }

    /// Check if the classifier currently considers the element visible.
    /// Unknown handles read as not visible.
    pub fn is_visible(&self, handle: RevealHandle) -> bool {
        self.states
            .get(&handle)
            .is_some_and(|state| state.is_visible())
    }

    /// Get the canonical config a registration runs with.
    pub fn config(&self, handle: RevealHandle) -> Option<&RevealConfig> {
        self.states.get(&handle).map(|state| state.config())
    }

    /// Get the live registration handle for an element, if any.
    pub fn handle_for(&self, element: ElementId) -> Option<RevealHandle> {
        self.by_element.get(&element).copied()
    }

    /// Check if a handle still refers to a live registration.
    pub fn is_registered(&self, handle: RevealHandle) -> bool {
        self.states.contains_key(&handle)
    }

    /// Get the number of live registrations.
    pub fn registered_count(&self) -> usize {
        self.states.len()
    }

    /// Get the number of live platform watchers.
    pub fn watcher_count(&self) -> usize {
        self.pool.watcher_count()
    }

    /// Get the number of elements currently observed through the pool.
    pub fn observed_count(&self) -> usize {
        self.pool.observed_count()
    }

    // ========================================================================
    // Effect and event draining
    // ========================================================================

    /// Drain the queued platform instructions, in execution order.
    pub fn drain_effects(&mut self) -> impl Iterator<Item = Effect> + '_ {
        self.effects.drain(..)
    }

    /// Check if any platform instructions are queued.
    pub fn has_pending_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    /// Get the number of queued platform instructions.
    pub fn pending_effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Drain all pending lifecycle events.
    ///
    /// # Example
    /// ```ignore
    /// for event in engine.drain_events() {
    ///     match event {
    ///         RevealEvent::EnterStarted { element, .. } => log_start(element),
    ///         RevealEvent::EnterEnded { element, .. } => log_end(element),
    ///     }
    /// }
    /// ```
    pub fn drain_events(&mut self) -> impl Iterator<Item = RevealEvent> + '_ {
        self.events.drain()
    }

    /// Check if there are any pending lifecycle events.
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get the number of pending lifecycle events.
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    /// Peek at the next lifecycle event without removing it.
    pub fn peek_event(&self) -> Option<&RevealEvent> {
        self.events.peek()
    }

    /// Pop a single lifecycle event from the queue.
    pub fn pop_event(&mut self) -> Option<RevealEvent> {
        self.events.pop()
    }

    /// Get all pending lifecycle events for an element (without removing
    /// them).
    pub fn events_for_element(&self, element: ElementId) -> Vec<&RevealEvent> {
        self.events.events_for_element(element)
    }

    /// Clear all pending lifecycle events without processing them.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Tear the engine down: cancel every pending frame and timer,
    /// disconnect every watcher, and drop all registrations and queued
    /// events. The cancellation and disconnect instructions are queued for
    /// one final drain.
    pub fn dispose(&mut self) {
        log::debug!(
            "dispose: registrations={} watchers={}",
            self.states.len(),
            self.pool.watcher_count()
        );

        let mut effects = Vec::new();
        let mut states: Vec<ElementState> = self.states.drain().map(|(_, state)| state).collect();
        states.sort_by_key(|state| state.handle());
        for state in &mut states {
            state.cancel_pending(&mut effects);
        }
        self.pool.disconnect_all(&mut effects);

        self.by_element.clear();
        self.frames.clear();
        self.timers.clear();
        self.callbacks.clear();
        self.events.clear();
        self.effects.extend(effects);
    }

    /// Queue lifecycle effects for the embedder, keeping the token routing
    /// tables in step and consuming callback invocations on the way.
    fn route_effects(&mut self, handle: RevealHandle, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::InvokeCallback { handle, element, kind } => {
                    self.events.push(RevealEvent::from_kind(kind, handle, element));
                    if let Some(callbacks) = self.callbacks.get_mut(&handle) {
                        callbacks.invoke(kind, element);
                    }
                }
                Effect::RequestFrame { token } => {
                    self.frames.insert(token, handle);
                    self.effects.push_back(Effect::RequestFrame { token });
                }
                Effect::CancelFrame { token } => {
                    self.frames.remove(&token);
                    self.effects.push_back(Effect::CancelFrame { token });
                }
                Effect::ScheduleCompletion { token, after_ms } => {
                    self.timers.insert(token, handle);
                    self.effects
                        .push_back(Effect::ScheduleCompletion { token, after_ms });
                }
                Effect::CancelCompletion { token } => {
                    self.timers.remove(&token);
                    self.effects.push_back(Effect::CancelCompletion { token });
                }
                other => self.effects.push_back(other),
            }
        }
    }
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::new(Capabilities::default())
    }
}

impl fmt::Debug for RevealEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealEngine")
            .field("capabilities", &self.capabilities)
            .field("registrations", &self.states.len())
            .field("watchers", &self.pool.watcher_count())
            .field("pending_effects", &self.effects.len())
            .field("pending_events", &self.events.len())
            .finish()
    }
}

// Ensure RevealEngine is Send so embedders can drive it off-thread.
static_assertions::assert_impl_all!(RevealEngine: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn drain(engine: &mut RevealEngine) -> Vec<Effect> {
        engine.drain_effects().collect()
    }

    fn created_watcher(effects: &[Effect]) -> WatcherId {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::CreateWatcher { watcher, .. } => Some(*watcher),
                _ => None,
            })
            .expect("no watcher created")
    }

    fn requested_frame(effects: &[Effect]) -> FrameToken {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::RequestFrame { token } => Some(*token),
                _ => None,
            })
            .expect("no frame requested")
    }

    fn scheduled_timer(effects: &[Effect]) -> TimerToken {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::ScheduleCompletion { token, .. } => Some(*token),
                _ => None,
            })
            .expect("no completion scheduled")
    }

    #[test]
    fn test_register_creates_and_observes_a_watcher() {
        let mut engine = RevealEngine::new(Capabilities::full());
        let handle = engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());

        assert!(engine.is_registered(handle));
        assert_eq!(engine.phase(handle), Some(RevealPhase::Idle));
        assert_eq!(engine.watcher_count(), 1);
        assert_eq!(engine.observed_count(), 1);

        let effects = drain(&mut engine);
        assert!(matches!(effects[0], Effect::CreateWatcher { .. }));
        assert!(matches!(effects[1], Effect::Observe { .. }));
    }

    #[test]
    fn test_equal_watch_configs_share_one_watcher() {
        let mut engine = RevealEngine::new(Capabilities::full());
        engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());
        engine.register(ElementId(2), &RevealSpec::new(), RevealCallbacks::new());

        assert_eq!(engine.watcher_count(), 1);
        assert_eq!(engine.observed_count(), 2);

        let distinct = RevealSpec::new().with_threshold(0.5);
        engine.register(ElementId(3), &distinct, RevealCallbacks::new());
        assert_eq!(engine.watcher_count(), 2);
    }

    #[test]
    fn test_reregistering_replaces_the_prior_handle() {
        let mut engine = RevealEngine::new(Capabilities::full());
        let first = engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());
        let second = engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());

        assert_ne!(first, second);
        assert!(!engine.is_registered(first));
        assert!(engine.is_registered(second));
        assert_eq!(engine.registered_count(), 1);
        assert_eq!(engine.observed_count(), 1);
        assert_eq!(engine.handle_for(ElementId(1)), Some(second));
    }

    #[test]
    fn test_full_entrance_through_platform_inputs() {
        let enter_ends = Arc::new(AtomicUsize::new(0));
        let mut engine = RevealEngine::new(Capabilities::full());
        let handle = engine.register(
            ElementId(1),
            &RevealSpec::new(),
            RevealCallbacks::new().with_enter_end({
                let enter_ends = Arc::clone(&enter_ends);
                move |_| {
                    enter_ends.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );

        let watcher = created_watcher(&drain(&mut engine));
        engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
        assert_eq!(engine.phase(handle), Some(RevealPhase::Entering));

        let effects = drain(&mut engine);
        assert!(matches!(effects[0], Effect::ApplyStyle { .. }));
        let frame = requested_frame(&effects);

        engine.frame_fired(frame);
        let effects = drain(&mut engine);
        let timer = scheduled_timer(&effects);

        engine.timer_fired(timer);
        assert_eq!(engine.phase(handle), Some(RevealPhase::Visible));
        assert_eq!(enter_ends.load(Ordering::SeqCst), 1);

        let events: Vec<RevealEvent> = engine.drain_events().collect();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_started());
        assert!(events[1].is_ended());
        assert_eq!(events[0].handle(), handle);
    }

    #[test]
    fn test_stale_tokens_are_ignored() {
        let mut engine = RevealEngine::new(Capabilities::full());
        engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());
        drain(&mut engine);

        engine.frame_fired(FrameToken(999));
        engine.timer_fired(TimerToken(999));

        assert!(!engine.has_pending_effects());
        assert!(!engine.has_pending_events());
    }

    #[test]
    fn test_unregister_cancels_the_pending_completion() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut engine = RevealEngine::new(Capabilities::full());
        let handle = engine.register(
            ElementId(1),
            &RevealSpec::new(),
            RevealCallbacks::new().with_enter_end({
                let calls = Arc::clone(&calls);
                move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );

        let watcher = created_watcher(&drain(&mut engine));
        engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
        let frame = requested_frame(&drain(&mut engine));
        engine.frame_fired(frame);
        let timer = scheduled_timer(&drain(&mut engine));

        assert!(engine.unregister(handle));
        assert!(!engine.unregister(handle));
        drain(&mut engine);
        engine.clear_events();

        // The timer the platform still holds fires into the void.
        engine.timer_fired(timer);
        assert!(!engine.has_pending_effects());
        assert!(!engine.has_pending_events());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_disabled_mode_settles_immediately() {
        let starts = Arc::new(AtomicUsize::new(0));
        let mut engine = RevealEngine::new(Capabilities::reduced_motion());
        let handle = engine.register(
            ElementId(1),
            &RevealSpec::new(),
            RevealCallbacks::new().with_enter_start({
                let starts = Arc::clone(&starts);
                move |_| {
                    starts.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );

        assert_eq!(engine.phase(handle), Some(RevealPhase::Visible));
        assert_eq!(engine.watcher_count(), 0);

        let effects = drain(&mut engine);
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::ApplyStyle { update, .. } => {
                assert_eq!(update.opacity, 1.0);
                assert!(update.transition.is_none());
            }
            other => panic!("expected ApplyStyle, got {other:?}"),
        }

        // Manual controls are inert and nothing is ever reported.
        engine.trigger(handle);
        engine.reset(handle);
        assert!(!engine.has_pending_effects());
        assert!(!engine.has_pending_events());
        assert_eq!(starts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_liveness_probe_drops_detached_completions() {
        let mut engine =
            RevealEngine::new(Capabilities::full()).with_liveness_probe(|_| false);
        let handle = engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());

        let watcher = created_watcher(&drain(&mut engine));
        engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
        let frame = requested_frame(&drain(&mut engine));
        engine.frame_fired(frame);
        let timer = scheduled_timer(&drain(&mut engine));

        engine.timer_fired(timer);

        // The phase advances but nothing reaches the embedder.
        assert_eq!(engine.phase(handle), Some(RevealPhase::Visible));
        assert!(!engine.has_pending_effects());
        let events: Vec<&RevealEvent> = engine.events_for_element(ElementId(1));
        assert_eq!(events.len(), 1);
        assert!(events[0].is_started());
    }

    #[test]
    fn test_dispose_cancels_and_disconnects_everything() {
        let mut engine = RevealEngine::new(Capabilities::full());
        engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());
        engine.register(
            ElementId(2),
            &RevealSpec::new().with_threshold(0.5),
            RevealCallbacks::new(),
        );

        let watcher = created_watcher(&drain(&mut engine));
        engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
        drain(&mut engine);

        engine.dispose();
        assert_eq!(engine.registered_count(), 0);
        assert_eq!(engine.watcher_count(), 0);
        assert!(!engine.has_pending_events());

        let effects = drain(&mut engine);
        assert!(effects.iter().any(|e| matches!(e, Effect::CancelFrame { .. })));
        assert_eq!(
            effects
                .iter()
                .filter(|e| matches!(e, Effect::DisconnectWatcher { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_trigger_and_reset_drive_the_lifecycle() {
        let mut engine = RevealEngine::new(Capabilities::full());
        let handle = engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());
        drain(&mut engine);

        engine.trigger(handle);
        assert_eq!(engine.phase(handle), Some(RevealPhase::Entering));

        engine.reset(handle);
        assert_eq!(engine.phase(handle), Some(RevealPhase::Idle));
        assert!(!engine.is_visible(handle));
    }
}
