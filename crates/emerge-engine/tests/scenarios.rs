//! End-to-end scenarios driving the engine purely through platform inputs
//! and drained effects, with no clock and no real platform.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use emerge_config::{DiagnosticKind, RevealSpec, normalize};
use emerge_engine::{
    Capabilities, Effect, ElementId, FrameToken, IntersectionRecord, RevealCallbacks, RevealEngine,
    RevealPhase, StyleUpdate, TimerToken, WatcherId,
};

fn drained(engine: &mut RevealEngine) -> Vec<Effect> {
    engine.drain_effects().collect()
}

fn created_watcher(effects: &[Effect]) -> WatcherId {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::CreateWatcher { watcher, .. } => Some(*watcher),
            _ => None,
        })
        .expect("expected a watcher to be created")
}

fn requested_frame(effects: &[Effect]) -> FrameToken {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::RequestFrame { token } => Some(*token),
            _ => None,
        })
        .expect("expected a frame request")
}

fn scheduled_timer(effects: &[Effect]) -> TimerToken {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::ScheduleCompletion { token, .. } => Some(*token),
            _ => None,
        })
        .expect("expected a completion to be scheduled")
}

fn applied_styles(effects: &[Effect]) -> Vec<StyleUpdate> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::ApplyStyle { update, .. } => Some(*update),
            _ => None,
        })
        .collect()
}

/// Drive one element through signal, frame, and completion.
fn enter_fully(engine: &mut RevealEngine, watcher: WatcherId, element: ElementId) {
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(element, 1.0, true)]);
    let frame = requested_frame(&drained(engine));
    engine.frame_fired(frame);
    let timer = scheduled_timer(&drained(engine));
    engine.timer_fired(timer);
    drained(engine);
}

#[test]
fn equal_watch_configs_share_one_watcher() {
    let mut engine = RevealEngine::new(Capabilities::full());
    engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());
    engine.register(ElementId(2), &RevealSpec::new(), RevealCallbacks::new());

    let effects = drained(&mut engine);
    let creations = effects
        .iter()
        .filter(|e| matches!(e, Effect::CreateWatcher { .. }))
        .count();
    assert_eq!(creations, 1, "equal conditions must reuse one watcher");
    assert_eq!(engine.watcher_count(), 1);
    assert_eq!(engine.observed_count(), 2);

    // A distinct threshold splits off its own watcher.
    engine.register(
        ElementId(3),
        &RevealSpec::new().with_threshold(0.5),
        RevealCallbacks::new(),
    );
    assert_eq!(engine.watcher_count(), 2);
}

#[test]
fn classifier_holds_visibility_until_half_threshold() {
    let mut engine = RevealEngine::new(Capabilities::full());
    let spec = RevealSpec::new().with_threshold(0.3);
    let handle = engine.register(ElementId(1), &spec, RevealCallbacks::new());
    let watcher = created_watcher(&drained(&mut engine));

    // 0.35 crosses the threshold: visible.
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 0.35, true)]);
    assert!(engine.is_visible(handle));

    // 0.2 is under the threshold but above half of it: still visible.
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 0.2, true)]);
    assert!(engine.is_visible(handle), "hysteresis must hold at 0.2");

    // 0.1 falls to half the threshold or below: gone.
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 0.1, true)]);
    assert!(!engine.is_visible(handle));
}

#[test]
fn defaults_enter_once_and_stay_settled() {
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
    let watcher = created_watcher(&drained(&mut engine));

    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
    assert_eq!(engine.phase(handle), Some(RevealPhase::Entering));
    let effects = drained(&mut engine);
    let styles = applied_styles(&effects);
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].opacity, 0.0);
    assert!(
        styles[0].transition.is_none(),
        "initial style must not transition"
    );

    engine.frame_fired(requested_frame(&effects));
    let effects = drained(&mut engine);
    let styles = applied_styles(&effects);
    assert_eq!(styles[0].opacity, 1.0);
    assert!(
        styles[0].transition.is_some(),
        "animate style must carry the transition"
    );

    engine.timer_fired(scheduled_timer(&effects));
    assert_eq!(engine.phase(handle), Some(RevealPhase::Visible));
    let styles = applied_styles(&drained(&mut engine));
    assert!(styles[0].transition.is_none(), "settled style is bare");
    assert_eq!(enter_ends.load(Ordering::SeqCst), 1);

    // Leaving and re-entering the viewport changes nothing once settled.
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 0.0, false)]);
    assert_eq!(engine.phase(handle), Some(RevealPhase::Visible));
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
    assert!(
        drained(&mut engine).is_empty(),
        "a once reveal must not animate twice"
    );
    assert_eq!(enter_ends.load(Ordering::SeqCst), 1);
}

#[test]
fn mirrored_reveal_replays_on_every_pass() {
    let mut engine = RevealEngine::new(Capabilities::full());
    let spec = RevealSpec::new().with_once(false).with_mirror(true);
    let handle = engine.register(ElementId(1), &spec, RevealCallbacks::new());
    let watcher = created_watcher(&drained(&mut engine));

    enter_fully(&mut engine, watcher, ElementId(1));
    assert_eq!(engine.phase(handle), Some(RevealPhase::Visible));

    // Scrolling out reverses immediately: initial style, no transition.
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 0.0, false)]);
    assert_eq!(engine.phase(handle), Some(RevealPhase::Idle));
    let styles = applied_styles(&drained(&mut engine));
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].opacity, 0.0);
    assert!(styles[0].transition.is_none(), "mirror reset is a hard cut");

    // Scrolling back in animates a second time.
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
    assert_eq!(engine.phase(handle), Some(RevealPhase::Entering));
    let effects = drained(&mut engine);
    assert!(
        effects.iter().any(|e| matches!(e, Effect::RequestFrame { .. })),
        "second pass must restart the entrance"
    );

    let events: Vec<_> = engine.drain_events().collect();
    let started = events.iter().filter(|e| e.is_started()).count();
    let ended = events.iter().filter(|e| e.is_ended()).count();
    assert_eq!(started, 2);
    assert_eq!(ended, 1);
}

#[test]
fn once_with_mirror_collapses_to_once() {
    let spec = RevealSpec::new().with_once(true).with_mirror(true);

    let normalized = normalize(&spec);
    assert!(!normalized.config.mirror, "once must neutralize mirror");
    assert!(
        normalized
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Contradiction),
        "the contradiction must be surfaced"
    );

    let mut engine = RevealEngine::new(Capabilities::full());
    let handle = engine.register(ElementId(1), &spec, RevealCallbacks::new());
    let watcher = created_watcher(&drained(&mut engine));
    enter_fully(&mut engine, watcher, ElementId(1));

    // Behaves exactly like a plain once reveal: no reversal on exit.
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 0.0, false)]);
    assert_eq!(engine.phase(handle), Some(RevealPhase::Visible));
    assert!(drained(&mut engine).is_empty());
}

#[test]
fn unregister_with_pending_timer_leaks_nothing() {
    let callbacks_fired = Arc::new(AtomicUsize::new(0));
    let mut engine = RevealEngine::new(Capabilities::full());
    let handle = engine.register(
        ElementId(1),
        &RevealSpec::new(),
        RevealCallbacks::new()
            .with_enter_start({
                let fired = Arc::clone(&callbacks_fired);
                move |_| {
                    fired.fetch_add(1, Ordering::SeqCst);
                }
            })
            .with_enter_end({
                let fired = Arc::clone(&callbacks_fired);
                move |_| {
                    fired.fetch_add(1, Ordering::SeqCst);
                }
            }),
    );
    let watcher = created_watcher(&drained(&mut engine));

    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
    let frame = requested_frame(&drained(&mut engine));
    engine.frame_fired(frame);
    let timer = scheduled_timer(&drained(&mut engine));
    let fired_before = callbacks_fired.load(Ordering::SeqCst);

    assert!(engine.unregister(handle));
    let effects = drained(&mut engine);
    assert!(
        effects
            .iter()
            .any(|e| matches!(e, Effect::CancelCompletion { .. })),
        "unregister must cancel the scheduled completion"
    );
    engine.clear_events();

    // The platform timer fires anyway; it must land in the void.
    engine.timer_fired(timer);
    assert!(!engine.has_pending_effects());
    assert!(!engine.has_pending_events());
    assert_eq!(callbacks_fired.load(Ordering::SeqCst), fired_before);
    assert_eq!(engine.phase(handle), None);
}

#[test]
fn reset_reapplies_the_exact_initial_style() {
    let mut engine = RevealEngine::new(Capabilities::full());
    let spec = RevealSpec::new().with_family("slide").with_direction("up");
    let handle = engine.register(ElementId(1), &spec, RevealCallbacks::new());
    let watcher = created_watcher(&drained(&mut engine));

    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
    let effects = drained(&mut engine);
    let first_initial = applied_styles(&effects)[0];
    engine.frame_fired(requested_frame(&effects));
    let effects = drained(&mut engine);
    engine.timer_fired(scheduled_timer(&effects));
    drained(&mut engine);

    engine.reset(handle);
    let styles = applied_styles(&drained(&mut engine));
    assert_eq!(
        styles.last().copied(),
        Some(first_initial),
        "reset must reproduce the entrance's initial style exactly"
    );
    assert_eq!(engine.phase(handle), Some(RevealPhase::Idle));
}

#[test]
fn interrupted_mirror_entrance_cancels_scheduled_work() {
    let mut engine = RevealEngine::new(Capabilities::full());
    let spec = RevealSpec::new().with_once(false).with_mirror(true);
    let handle = engine.register(ElementId(1), &spec, RevealCallbacks::new());
    let watcher = created_watcher(&drained(&mut engine));

    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 1.0, true)]);
    let frame = requested_frame(&drained(&mut engine));
    engine.frame_fired(frame);
    let timer = scheduled_timer(&drained(&mut engine));

    // The element scrolls out before the completion lands.
    engine.deliver_intersections(watcher, &[IntersectionRecord::new(ElementId(1), 0.0, false)]);
    assert_eq!(engine.phase(handle), Some(RevealPhase::Idle));
    let effects = drained(&mut engine);
    assert!(
        effects
            .iter()
            .any(|e| matches!(e, Effect::CancelCompletion { token } if *token == timer)),
        "the in-flight completion must be cancelled"
    );

    engine.timer_fired(timer);
    assert!(!engine.has_pending_effects(), "a cancelled timer is inert");
    assert_eq!(engine.phase(handle), Some(RevealPhase::Idle));
}

#[test]
fn measurement_batches_only_reach_watcher_members() {
    let mut engine = RevealEngine::new(Capabilities::full());
    let low = engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());
    let high = engine.register(
        ElementId(2),
        &RevealSpec::new().with_threshold(0.5),
        RevealCallbacks::new(),
    );
    let effects = drained(&mut engine);
    let first_watcher = created_watcher(&effects);

    // A batch aimed at the first watcher carries a record for the other
    // pool's element too; that record must be dropped.
    engine.deliver_intersections(
        first_watcher,
        &[
            IntersectionRecord::new(ElementId(1), 1.0, true),
            IntersectionRecord::new(ElementId(2), 1.0, true),
        ],
    );
    assert_eq!(engine.phase(low), Some(RevealPhase::Entering));
    assert_eq!(engine.phase(high), Some(RevealPhase::Idle));
}

#[test]
fn disabled_modes_settle_immediately_and_stay_inert() {
    for capabilities in [Capabilities::reduced_motion(), Capabilities::no_watchers()] {
        let mut engine = RevealEngine::new(capabilities);
        let handle = engine.register(ElementId(1), &RevealSpec::new(), RevealCallbacks::new());

        assert_eq!(engine.phase(handle), Some(RevealPhase::Visible));
        assert_eq!(engine.watcher_count(), 0, "the pool must stay untouched");

        let effects = drained(&mut engine);
        assert_eq!(effects.len(), 1);
        let styles = applied_styles(&effects);
        assert_eq!(styles[0].opacity, 1.0);
        assert!(styles[0].transform.is_none());

        engine.trigger(handle);
        engine.reset(handle);
        assert!(!engine.has_pending_effects());
        assert!(!engine.has_pending_events());
    }
}
