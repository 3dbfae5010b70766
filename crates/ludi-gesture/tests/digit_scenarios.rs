//! End-to-end scenarios: bundled digit templates replayed through the
//! classifier and both capture sessions as if drawn on screen.

use std::sync::Arc;
use glam::Vec2;
use ludi_gesture::{
    CaptureSession, Classifier, ClassifierConfig, Gesture, InputEvent, InputQueue, Recognition,
    SessionConfig, SessionState, SimpleSession, SplitSession, TemplateStore,
};

const WIDTH: f32 = 800.0;
const FRAME: f32 = 1.0 / 60.0;

fn classifier() -> Arc<Classifier> {
    Arc::new(Classifier::new(ClassifierConfig::default(), &TemplateStore::bundled_digits()))
}

fn digit(label: &str) -> Gesture {
    TemplateStore::bundled_digits()
        .find(label)
        .cloned()
        .unwrap_or_else(|| panic!("missing bundled digit {}", label))
}

/// Strokes of a bundled digit in screen space, shifted by `offset`.
fn screen_strokes(label: &str, offset: Vec2) -> Vec<Vec<Vec2>> {
    let gesture = digit(label);
    let mut strokes: Vec<Vec<Vec2>> = Vec::new();
    let mut current = None;
    for p in &gesture.points {
        if current != Some(p.stroke_id) {
            strokes.push(Vec::new());
            current = Some(p.stroke_id);
        }
        if let Some(stroke) = strokes.last_mut() {
            stroke.push(Vec2::new(p.x, -p.y) + offset);
        }
    }
    strokes
}

fn queue_strokes(queue: &mut InputQueue, strokes: &[Vec<Vec2>]) {
    for stroke in strokes {
        let (first, rest) = match stroke.split_first() {
            Some(split) => split,
            None => continue,
        };
        queue.push(InputEvent::PointerDown { x: first.x, y: first.y });
        for p in rest {
            queue.push(InputEvent::PointerMove { x: p.x, y: p.y });
        }
        let last = stroke.last().unwrap_or(first);
        queue.push(InputEvent::PointerUp { x: last.x, y: last.y });
    }
}

/// Feed the queued events on the first frame, then tick until a result.
fn drive(session: &mut dyn CaptureSession, queue: &mut InputQueue, seconds: f32) -> Option<Recognition> {
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        let result = session.step(FRAME, queue);
        queue.clear();
        if result.is_some() {
            return result;
        }
    }
    None
}

#[test]
fn every_bundled_digit_recognizes_itself() {
    let classifier = classifier();
    for label in ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"] {
        let c = classifier.classify(&digit(label)).unwrap();
        assert_eq!(c.label, label);
        assert!(c.score > 0.95, "{} scored {}", label, c.score);
    }
}

#[test]
fn scaled_and_rotated_seven() {
    let angle = 15.0_f32.to_radians();
    let rot = Vec2::from_angle(angle);
    let seven = digit("7").transformed(|p| rot.rotate(p * 2.0) + Vec2::new(300.0, -40.0));

    let c = classifier().classify(&seven).unwrap();
    assert_eq!(c.label, "7");
    assert!(c.score > 0.7, "score {}", c.score);
}

#[test]
fn single_zone_session_reports_number() {
    let mut session = SimpleSession::new(SessionConfig::single_zone(), classifier());
    session.set_expected_answer(Some(3));

    let mut queue = InputQueue::new();
    queue_strokes(&mut queue, &screen_strokes("3", Vec2::new(200.0, 150.0)));
    let r = drive(&mut session, &mut queue, 4.0).expect("no recognition");

    assert_eq!(r.label, "3");
    assert_eq!(r.number, Some(3));
    assert!(r.succeeded);

    session.update(FRAME);
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn multi_stroke_four_in_single_zone() {
    let mut session = SimpleSession::new(SessionConfig::single_zone(), classifier());
    let mut queue = InputQueue::new();
    let strokes = screen_strokes("4", Vec2::new(120.0, 80.0));
    assert_eq!(strokes.len(), 2);
    queue_strokes(&mut queue, &strokes);

    let r = drive(&mut session, &mut queue, 4.0).expect("no recognition");
    assert_eq!(r.label, "4");
}

#[test]
fn split_zone_composes_left_then_right() {
    let mut session = SplitSession::new(SessionConfig::split_zone(), classifier(), WIDTH);
    session.set_expected_answer(Some(42));

    let mut queue = InputQueue::new();
    // Right digit drawn first: order of drawing must not matter
    queue_strokes(&mut queue, &screen_strokes("2", Vec2::new(550.0, 150.0)));
    queue_strokes(&mut queue, &screen_strokes("4", Vec2::new(150.0, 150.0)));
    let r = drive(&mut session, &mut queue, 3.0).expect("no recognition");

    assert_eq!(r.label, "42");
    assert_eq!(r.number, Some(42));
    assert!(r.succeeded);
    assert_eq!(r.parts.len(), 2);
    let weakest = r.parts.iter().map(|p| p.score).fold(f32::MAX, f32::min);
    assert_eq!(r.score, weakest);
}

#[test]
fn split_zone_with_only_left_digit() {
    let mut session = SplitSession::new(SessionConfig::split_zone(), classifier(), WIDTH);
    session.set_expected_answer(Some(7));

    let mut queue = InputQueue::new();
    queue_strokes(&mut queue, &screen_strokes("7", Vec2::new(100.0, 100.0)));
    let r = drive(&mut session, &mut queue, 3.0).expect("no recognition");

    assert_eq!(r.label, "7");
    assert!(r.succeeded);
}

#[test]
fn split_zone_wrong_answer_locks_then_clears() {
    let mut session = SplitSession::new(SessionConfig::split_zone(), classifier(), WIDTH);
    session.set_expected_answer(Some(10));

    let mut queue = InputQueue::new();
    queue_strokes(&mut queue, &screen_strokes("1", Vec2::new(100.0, 100.0)));
    queue_strokes(&mut queue, &screen_strokes("8", Vec2::new(500.0, 100.0)));
    let r = drive(&mut session, &mut queue, 3.0).expect("no recognition");
    assert_eq!(r.label, "18");
    assert!(!r.succeeded);
    assert_eq!(session.state(), SessionState::Cooldown);

    assert!(drive(&mut session, &mut queue, 3.0).is_none());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.left().is_empty() && session.right().is_empty());
}

#[test]
fn suspended_session_ignores_a_whole_digit() {
    let mut session = SimpleSession::new(SessionConfig::single_zone(), classifier());
    session.set_suspended(true);

    let mut queue = InputQueue::new();
    queue_strokes(&mut queue, &screen_strokes("5", Vec2::new(100.0, 100.0)));
    assert!(drive(&mut session, &mut queue, 5.0).is_none());
    assert!(session.points().is_empty());
    assert_eq!(session.state(), SessionState::Suspended);
}
