// Host-side tests for the section tracker against a fake page layout.

use scrolly_globe::core::{
    Bounds, Container, ScrollError, ScrollEvent, ScrollHost, Scroller, SectionPositions,
};
use std::cell::RefCell;
use std::rc::Rc;

const CONTAINER: usize = 0;

/// Rects are in document coordinates; index 0 is the container.
struct FakePage {
    scroll: f64,
    viewport_height: f64,
    rects: Vec<Bounds>,
}

impl ScrollHost for FakePage {
    type Element = usize;

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn bounds(&self, element: &usize) -> Bounds {
        let r = self.rects[*element];
        Bounds {
            top: r.top - self.scroll,
            bottom: r.bottom - self.scroll,
        }
    }

    fn container_top(&self, container: &Container<usize>) -> f64 {
        match container {
            Container::Element(i) => self.rects[*i].top - self.scroll,
            Container::DocumentRoot => -self.scroll,
        }
    }
}

/// Container at document offset 100; sections end 500, 1200 and 2000 px
/// below the first section's top; viewport 800 px tall.
fn page_layout(section_bottoms: &[f64]) -> Vec<Bounds> {
    let mut rects = vec![Bounds {
        top: 100.0,
        bottom: 100.0 + section_bottoms.last().copied().unwrap_or(0.0),
    }];
    let mut top = 100.0;
    for bottom in section_bottoms {
        rects.push(Bounds {
            top,
            bottom: 100.0 + bottom,
        });
        top = 100.0 + bottom;
    }
    rects
}

type Log = Rc<RefCell<Vec<String>>>;

fn scroller_at(scroll: f64) -> (Scroller<FakePage>, Log) {
    let page = FakePage {
        scroll,
        viewport_height: 800.0,
        rects: page_layout(&[500.0, 1200.0, 2000.0]),
    };
    let mut scroller = Scroller::new(page);
    scroller.set_container(Container::Element(CONTAINER));
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    {
        let log = log.clone();
        scroller.on_active(move |i| log.borrow_mut().push(format!("active {i}")));
    }
    {
        let log = log.clone();
        scroller.on_progress(move |i, p| log.borrow_mut().push(format!("progress {i} {p:.3}")));
    }
    scroller.attach(vec![1, 2, 3]).unwrap();
    (scroller, log)
}

fn scroll_to(scroller: &mut Scroller<FakePage>, offset: f64) {
    scroller.host_mut().scroll = offset;
    scroller.handle(ScrollEvent::Scroll);
}

#[test]
fn attach_measures_positions_relative_to_first_section() {
    let (scroller, log) = scroller_at(0.0);
    assert_eq!(
        scroller.section_positions().as_slice(),
        &[500.0, 1200.0, 2000.0]
    );
    assert_eq!(scroller.container_start(), 100.0);
    assert_eq!(scroller.active_index(), None);
    assert!(log.borrow().is_empty(), "attach itself must not notify");
}

#[test]
fn container_start_is_document_relative_even_when_attached_scrolled() {
    let (scroller, _) = scroller_at(650.0);
    assert_eq!(scroller.container_start(), 100.0);
    assert_eq!(
        scroller.section_positions().as_slice(),
        &[500.0, 1200.0, 2000.0]
    );
}

#[test]
fn scenario_a_first_section() {
    let (mut scroller, log) = scroller_at(0.0);
    scroll_to(&mut scroller, 100.0);
    assert_eq!(scroller.cursor(), 400.0);
    assert_eq!(scroller.active_index(), Some(0));
    assert_eq!(*log.borrow(), vec!["active 0", "progress 0 0.800"]);
}

#[test]
fn scenario_b_second_section() {
    let (mut scroller, log) = scroller_at(0.0);
    scroll_to(&mut scroller, 700.0);
    assert_eq!(scroller.cursor(), 1000.0);
    assert_eq!(scroller.active_index(), Some(1));
    assert_eq!(*log.borrow(), vec!["active 1", "progress 1 0.714"]);
}

#[test]
fn scenario_c_resize_rebuilds_positions_and_start() {
    let (mut scroller, log) = scroller_at(700.0);
    scroller.settle();
    assert_eq!(scroller.active_index(), Some(1));

    // Narrower window: shorter viewport, taller sections, container pushed down.
    {
        let page = scroller.host_mut();
        page.viewport_height = 300.0;
        page.rects = page_layout(&[800.0, 1600.0, 2400.0])
            .into_iter()
            .map(|b| Bounds {
                top: b.top + 50.0,
                bottom: b.bottom + 50.0,
            })
            .collect();
    }
    scroller.handle(ScrollEvent::Resize);

    assert_eq!(
        scroller.section_positions().as_slice(),
        &[800.0, 1600.0, 2400.0]
    );
    assert_eq!(scroller.container_start(), 150.0);
    // cursor = 700 - 150 + 150
    assert_eq!(scroller.cursor(), 700.0);
    assert_eq!(scroller.active_index(), Some(0));
    assert_eq!(log.borrow().last().unwrap(), "progress 0 0.875");
}

#[test]
fn cursor_on_a_boundary_selects_that_section() {
    let (mut scroller, _) = scroller_at(0.0);
    let positions = scroller.section_positions().as_slice().to_vec();
    for (i, boundary) in positions.iter().enumerate() {
        // cursor = scroll - 100 + 400
        scroll_to(&mut scroller, boundary - 300.0);
        assert_eq!(scroller.cursor(), *boundary);
        assert_eq!(scroller.active_index(), Some(i), "boundary {boundary}");
    }
}

#[test]
fn cursor_outside_all_sections_is_clamped() {
    let (mut scroller, log) = scroller_at(0.0);
    scroller.host_mut().viewport_height = 0.0;
    scroll_to(&mut scroller, 0.0);
    assert_eq!(scroller.active_index(), Some(0));
    assert_eq!(log.borrow().last().unwrap(), "progress 0 0.000");

    scroll_to(&mut scroller, 10_000.0);
    assert_eq!(scroller.active_index(), Some(2));
    assert_eq!(log.borrow().last().unwrap(), "progress 2 1.000");
}

#[test]
fn active_fires_only_on_change_progress_every_tick() {
    let (mut scroller, log) = scroller_at(0.0);
    for offset in [100.0, 150.0, 200.0, 700.0, 750.0] {
        scroll_to(&mut scroller, offset);
    }
    let log = log.borrow();
    let actives: Vec<&String> = log.iter().filter(|l| l.starts_with("active")).collect();
    let progresses = log.iter().filter(|l| l.starts_with("progress")).count();
    assert_eq!(actives, vec!["active 0", "active 1"]);
    assert_eq!(progresses, 5);
}

#[test]
fn active_is_delivered_before_progress_on_the_same_tick() {
    let (mut scroller, log) = scroller_at(0.0);
    scroll_to(&mut scroller, 700.0);
    scroll_to(&mut scroller, 100.0);
    assert_eq!(
        *log.borrow(),
        vec!["active 1", "progress 1 0.714", "active 0", "progress 0 0.800"]
    );
}

#[test]
fn settle_runs_exactly_once_after_attach() {
    let (mut scroller, log) = scroller_at(700.0);
    assert!(scroller.settle_pending());
    assert!(scroller.settle());
    assert!(!scroller.settle());
    assert_eq!(*log.borrow(), vec!["active 1", "progress 1 0.714"]);
}

#[test]
fn reattach_resets_the_active_section() {
    let (mut scroller, log) = scroller_at(700.0);
    scroller.settle();
    scroller.attach(vec![1, 2, 3]).unwrap();
    assert_eq!(scroller.active_index(), None);
    scroller.settle();
    let actives = log.borrow().iter().filter(|l| l.starts_with("active")).count();
    assert_eq!(actives, 2);
}

#[test]
fn attaching_zero_sections_fails() {
    let page = FakePage {
        scroll: 0.0,
        viewport_height: 800.0,
        rects: Vec::new(),
    };
    let mut scroller = Scroller::new(page);
    assert_eq!(scroller.attach(Vec::new()), Err(ScrollError::NoSections));
    assert!(!scroller.settle_pending());
}

#[test]
fn container_defaults_to_document_root() {
    let page = FakePage {
        scroll: 0.0,
        viewport_height: 800.0,
        rects: page_layout(&[500.0, 1200.0, 2000.0]),
    };
    let mut scroller = Scroller::new(page);
    assert_eq!(*scroller.container(), Container::DocumentRoot);
    scroller.attach(vec![1, 2, 3]).unwrap();
    assert_eq!(scroller.container_start(), 0.0);
    // cursor = 0 - 0 + 400: first section still, sections start at 100
    scroller.settle();
    assert_eq!(scroller.active_index(), Some(0));
}

#[test]
fn unsubscribed_listeners_stop_receiving() {
    let (mut scroller, _) = scroller_at(0.0);
    let count = Rc::new(RefCell::new(0));
    let id = {
        let count = count.clone();
        scroller.on_progress(move |_, _| *count.borrow_mut() += 1)
    };
    scroll_to(&mut scroller, 100.0);
    assert!(scroller.unsubscribe(id));
    scroll_to(&mut scroller, 150.0);
    assert_eq!(*count.borrow(), 1);
    assert!(!scroller.unsubscribe(id));
}

#[test]
fn positions_from_offsets_keep_order() {
    let p = SectionPositions::from_offsets(vec![10.0, 20.0, 30.0]);
    assert_eq!(p.len(), 3);
    assert!(p.as_slice().windows(2).all(|w| w[0] <= w[1]));
}
