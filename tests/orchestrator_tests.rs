// Host-side tests for the scroll -> projection orchestration.

use glam::DVec2;
use scrolly_globe::core::{
    parse_crashes, Bounds, Container, GeoPoint, LockKey, Orchestrator, ProjectionState,
    ProjectionTarget, ScrollEvent, ScrollHost, Scroller, SectionEmphasis, TargetTable,
    Translation, ViewConfig,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn close(a: DVec2, b: DVec2, tol: f64) -> bool {
    (a - b).length() < tol
}

// (-42, 120) lies past the north pole; the table folds it to (138, 60).
const FOLDED_ROTATION: DVec2 = DVec2::new(-138.0, -60.0);

#[derive(Clone, Default)]
struct RecordingEmphasis(Rc<RefCell<Vec<usize>>>);

impl SectionEmphasis for RecordingEmphasis {
    fn emphasize(&mut self, active: usize) {
        self.0.borrow_mut().push(active);
    }
}

fn target(lon: f64, lat: f64, x: f64, scale: f64) -> ProjectionTarget {
    ProjectionTarget {
        centre: GeoPoint::new(lon, lat),
        translation: Translation::Relative(DVec2::new(x, 0.5)),
        scale,
    }
}

const VIEWPORT: DVec2 = DVec2::new(1000.0, 800.0);

fn orchestrator() -> (Orchestrator, Rc<RefCell<ProjectionState>>, RecordingEmphasis) {
    let config = ViewConfig::default();
    let targets = TargetTable::new(vec![
        target(0.0, 0.0, 0.5, 600.0),
        target(46.0, 46.0, 0.75, 1200.0),
        target(-42.0, 120.0, 0.25, 900.0),
    ])
    .unwrap();
    let state = Rc::new(RefCell::new(ProjectionState::default()));
    let mut orch = Orchestrator::new(&config, targets, state.clone(), VIEWPORT);
    let emphasis = RecordingEmphasis::default();
    orch.set_emphasis(emphasis.clone());
    (orch, state, emphasis)
}

#[test]
fn starts_on_the_first_target() {
    let (mut orch, state, emphasis) = orchestrator();
    let s = *state.borrow();
    assert_eq!(s.rotation, DVec2::ZERO);
    assert_eq!(s.translation, DVec2::new(500.0, 400.0));
    assert_eq!(s.scale, 600.0);
    assert_eq!(orch.current_index(), None);
    assert!(emphasis.0.borrow().is_empty());
    // First frame paints even with nothing animating.
    assert!(orch.frame(ms(0)));
    assert!(!orch.frame(ms(16)));
}

#[test]
fn activation_animates_all_parameters_to_the_target() {
    let (mut orch, state, emphasis) = orchestrator();
    orch.on_active(1);
    assert_eq!(*emphasis.0.borrow(), vec![1]);
    for key in LockKey::ALL {
        assert!(orch.is_animating(key), "{} not animating", key.label());
    }

    orch.frame(ms(1000));
    orch.frame(ms(2500));
    let mid = *state.borrow();
    assert!(mid.scale > 600.0 && mid.scale < 1200.0);
    assert!(mid.translation.x > 500.0 && mid.translation.x < 750.0);

    assert!(orch.frame(ms(4000)));
    let end = *state.borrow();
    assert_eq!(end.rotation, DVec2::new(-46.0, -46.0));
    assert_eq!(end.translation, DVec2::new(750.0, 400.0));
    assert_eq!(end.scale, 1200.0);
    assert!(orch.is_idle());
    assert!(!orch.frame(ms(4016)));
}

#[test]
fn configured_duration_is_honoured() {
    let config = ViewConfig::default().with_transition_millis(500);
    let targets = TargetTable::from_dataset(&config.section_defaults, &[]).unwrap();
    let state = Rc::new(RefCell::new(ProjectionState::default()));
    let mut orch = Orchestrator::new(&config, targets, state.clone(), VIEWPORT);
    orch.on_active(2);
    orch.frame(ms(0));
    orch.frame(ms(500));
    assert_eq!(state.borrow().scale, 900.0);
    assert!(orch.is_idle());
}

#[test]
fn rapid_section_changes_converge_on_the_latest() {
    let (mut orch, state, emphasis) = orchestrator();
    orch.on_active(1);
    orch.frame(ms(0));
    orch.frame(ms(200));
    orch.on_active(2);
    orch.frame(ms(300));
    orch.frame(ms(10_000));
    let end = *state.borrow();
    assert!(close(end.rotation, FOLDED_ROTATION, 1e-9), "{:?}", end.rotation);
    assert_eq!(end.translation, DVec2::new(250.0, 400.0));
    assert_eq!(end.scale, 900.0);
    assert_eq!(*emphasis.0.borrow(), vec![1, 2]);
}

#[test]
fn last_frame_continues_the_path_for_a_centre_past_the_pole() {
    let config = ViewConfig::default().with_transition_millis(1000);
    let targets = TargetTable::from_dataset(&config.section_defaults, &[]).unwrap();
    let state = Rc::new(RefCell::new(ProjectionState::default()));
    let mut orch = Orchestrator::new(&config, targets, state.clone(), VIEWPORT);
    orch.on_active(2);

    // Ten degrees north of the folded centre (138, 60).
    let marker = GeoPoint::new(138.0, 70.0);
    orch.frame(ms(0));
    orch.frame(ms(999));
    let before = state.borrow().project(marker).unwrap();
    orch.frame(ms(1000));
    let after = state.borrow().project(marker).unwrap();
    assert!(close(before, after, 5.0), "{before:?} -> {after:?}");

    // North stays up: the point sits above the globe centre.
    assert!(after.y < state.borrow().translation.y);

    // Leaving the section starts from where the last frame put the globe.
    orch.on_active(0);
    orch.frame(ms(1100));
    let restart = state.borrow().project(marker).unwrap();
    assert!(close(after, restart, 1e-6));
}

#[test]
fn index_past_the_table_uses_the_last_target() {
    let (mut orch, state, emphasis) = orchestrator();
    orch.on_active(7);
    orch.frame(ms(0));
    orch.frame(ms(3000));
    assert_eq!(state.borrow().scale, 900.0);
    // Emphasis still sees the real section index.
    assert_eq!(*emphasis.0.borrow(), vec![7]);
}

#[test]
fn resize_snaps_translation_and_supersedes_its_animation() {
    let (mut orch, state, _) = orchestrator();
    orch.on_active(1);
    orch.frame(ms(0));
    orch.frame(ms(1000));

    orch.on_resize(DVec2::new(600.0, 400.0));
    assert_eq!(state.borrow().translation, DVec2::new(450.0, 200.0));
    assert_eq!(orch.viewport(), DVec2::new(600.0, 400.0));

    assert!(orch.frame(ms(1500)));
    assert!(!orch.is_animating(LockKey::Translation));
    assert!(orch.is_animating(LockKey::Scale));
    assert!(orch.is_animating(LockKey::Rotation));

    orch.frame(ms(2500));
    assert_eq!(state.borrow().translation, DVec2::new(450.0, 200.0));
    orch.frame(ms(3000));
    assert_eq!(state.borrow().translation, DVec2::new(450.0, 200.0));
    assert_eq!(state.borrow().scale, 1200.0);
}

#[test]
fn resize_before_any_section_uses_the_first_target() {
    let (mut orch, state, _) = orchestrator();
    orch.frame(ms(0));
    orch.on_resize(DVec2::new(200.0, 100.0));
    assert_eq!(state.borrow().translation, DVec2::new(100.0, 50.0));
    assert!(orch.frame(ms(16)));
}

#[test]
fn progress_is_forwarded_without_moving_the_globe() {
    let (mut orch, state, _) = orchestrator();
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        orch.set_progress_hook(move |i, p| seen.borrow_mut().push((i, p)));
    }
    let before = *state.borrow();
    orch.on_progress(0, 0.25);
    orch.on_progress(0, 0.5);
    assert_eq!(*seen.borrow(), vec![(0, 0.25), (0, 0.5)]);
    assert_eq!(orch.last_progress(), Some((0, 0.5)));
    assert_eq!(*state.borrow(), before);
    assert!(orch.is_idle());
}

#[test]
fn dataset_locations_override_default_centres() {
    let crashes = parse_crashes(
        r#"[
            {"coord": {"longitude": 10.0, "latitude": 20.0}},
            {"coord": {"longitude": -30.0, "latitude": 40.0}}
        ]"#,
    )
    .unwrap();
    let config = ViewConfig::default();
    let targets = TargetTable::from_dataset(&config.section_defaults, &crashes).unwrap();
    assert_eq!(targets.len(), 3);
    assert_eq!(targets.get(0).centre, GeoPoint::new(10.0, 20.0));
    assert_eq!(targets.get(1).centre, GeoPoint::new(-30.0, 40.0));
    assert_eq!(targets.get(1).scale, 1200.0);
    let centre = targets.get(2).centre;
    assert!((centre.lon - 138.0).abs() < 1e-9 && (centre.lat - 60.0).abs() < 1e-9);
}

// Minimal page for wiring the tracker straight into the orchestrator.
struct Page {
    scroll: f64,
    bottoms: Vec<f64>,
}

impl ScrollHost for Page {
    type Element = usize;

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn viewport_height(&self) -> f64 {
        800.0
    }

    fn bounds(&self, element: &usize) -> Bounds {
        let top = if *element == 0 {
            0.0
        } else {
            self.bottoms[element - 1]
        };
        Bounds {
            top: top - self.scroll,
            bottom: self.bottoms[*element] - self.scroll,
        }
    }

    fn container_top(&self, _: &Container<usize>) -> f64 {
        -self.scroll
    }
}

#[test]
fn scrolling_drives_the_projection_end_to_end() {
    let (orch, state, emphasis) = orchestrator();
    let orch = Rc::new(RefCell::new(orch));
    let mut scroller = Scroller::new(Page {
        scroll: 0.0,
        bottoms: vec![500.0, 1200.0, 2000.0],
    });
    {
        let orch = orch.clone();
        scroller.on_active(move |i| orch.borrow_mut().on_active(i));
    }
    {
        let orch = orch.clone();
        scroller.on_progress(move |i, p| orch.borrow_mut().on_progress(i, p));
    }
    scroller.attach(vec![0, 1, 2]).unwrap();
    scroller.settle();
    assert_eq!(*emphasis.0.borrow(), vec![0]);

    scroller.host_mut().scroll = 1200.0;
    scroller.handle(ScrollEvent::Scroll);
    assert_eq!(*emphasis.0.borrow(), vec![0, 2]);
    assert_eq!(orch.borrow().last_progress(), Some((2, 0.5)));

    orch.borrow_mut().frame(ms(0));
    orch.borrow_mut().frame(ms(3000));
    assert!(close(state.borrow().rotation, FOLDED_ROTATION, 1e-9));
}
