use std::sync::Arc;
use glam::Vec2;
use crate::api::config::SessionConfig;
use crate::api::types::Recognition;
use crate::core::point::Point;
use crate::core::time::Stopwatch;
use crate::recognizer::Classifier;
use super::zone::{Zone, ZoneColor};
use super::{CaptureSession, Gate, GateStep, SessionState};

const LEFT: usize = 0;
const RIGHT: usize = 1;

/// Split-zone capture for two-digit answers.
///
/// The surface is divided into a left and a right half. Each stroke belongs
/// to the half where it started; at recognition time each half is classified
/// on its own and the labels are joined left to right.
pub struct SplitSession {
    config: SessionConfig,
    classifier: Arc<Classifier>,
    surface_width: f32,
    colors: [ZoneColor; 2],
    zones: [Zone; 2],
    /// Zone owning the stroke in progress.
    current_zone: Option<usize>,
    current: Vec<Point>,
    drawing: bool,
    idle: Stopwatch,
    gate: Gate,
}

impl SplitSession {
    pub fn new(config: SessionConfig, classifier: Arc<Classifier>, surface_width: f32) -> Self {
        let colors = [ZoneColor::RED, ZoneColor::BLUE];
        Self {
            config,
            classifier,
            surface_width,
            colors,
            zones: make_zones(surface_width, colors),
            current_zone: None,
            current: Vec::with_capacity(128),
            drawing: false,
            idle: Stopwatch::new(),
            gate: Gate::new(),
        }
    }

    /// Override the stroke colors of the left and right zones.
    pub fn with_zone_colors(mut self, left: ZoneColor, right: ZoneColor) -> Self {
        self.colors = [left, right];
        for (zone, color) in self.zones.iter_mut().zip(self.colors) {
            zone.color = color;
        }
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn surface_width(&self) -> f32 {
        self.surface_width
    }

    /// Rebuild both zones for a new surface width. Buffered strokes are dropped.
    pub fn set_surface_width(&mut self, width: f32) {
        self.surface_width = width;
        self.reset();
    }

    pub fn zones(&self) -> &[Zone; 2] {
        &self.zones
    }

    pub fn left(&self) -> &Zone {
        &self.zones[LEFT]
    }

    pub fn right(&self) -> &Zone {
        &self.zones[RIGHT]
    }

    /// Samples of the stroke being drawn, not yet committed to a zone.
    pub fn current_stroke(&self) -> &[Point] {
        &self.current
    }

    fn has_strokes(&self) -> bool {
        self.zones.iter().any(|z| !z.is_empty())
    }

    fn reset(&mut self) {
        self.zones = make_zones(self.surface_width, self.colors);
        self.current.clear();
        self.current_zone = None;
        self.drawing = false;
        self.idle.reset();
    }

    fn finish_stroke(&mut self) {
        self.drawing = false;
        let points = std::mem::take(&mut self.current);
        match self.current_zone.take() {
            Some(zone) if points.len() >= self.config.min_stroke_points => {
                self.zones[zone].add_stroke(points);
                self.idle.reset();
            }
            _ => log::debug!("Dropping stroke with {} points", points.len()),
        }
    }

    fn recognize(&mut self) -> Option<Recognition> {
        let min_points = self.classifier.config().min_points;
        let ready: Vec<usize> = (0..self.zones.len())
            .filter(|&i| !self.zones[i].is_empty() && self.zones[i].point_count() >= min_points)
            .collect();

        if ready.is_empty() {
            log::debug!("Neither zone has {} points, discarding", min_points);
            self.reset();
            return None;
        }

        let mut parts = Vec::with_capacity(ready.len());
        let mut failed = false;
        for &i in &ready {
            match self.classifier.classify(&self.zones[i].gesture()) {
                Ok(classification) => parts.push(classification),
                Err(e) => {
                    log::warn!("Recognition failed in {} zone: {}", self.zones[i].name, e);
                    failed = true;
                }
            }
        }

        let recognition = if failed {
            Recognition::failed()
        } else {
            Recognition::from_parts(parts, self.gate.expected())
        };
        log::info!(
            "Recognized number {:?} (score {:.2}, succeeded: {})",
            recognition.label,
            recognition.score,
            recognition.succeeded
        );

        self.gate.lock(recognition.succeeded, &self.config);
        Some(recognition)
    }
}

impl CaptureSession for SplitSession {
    fn pointer_down(&mut self, pos: Vec2) {
        if !self.gate.accepts_input() {
            return;
        }
        if self.drawing {
            self.finish_stroke();
        }
        let Some(zone) = self.zones.iter().position(|z| z.contains(pos.x)) else {
            self.current_zone = None;
            return;
        };
        self.current_zone = Some(zone);
        self.drawing = true;
        self.current.clear();
        self.idle.reset();
        self.current.push(Point::from_screen(pos, 0));
    }

    fn pointer_move(&mut self, pos: Vec2) {
        if !self.gate.accepts_input() || !self.drawing || self.current_zone.is_none() {
            return;
        }
        self.current.push(Point::from_screen(pos, 0));
    }

    fn pointer_up(&mut self, _pos: Vec2) {
        if !self.gate.accepts_input() || !self.drawing {
            return;
        }
        self.finish_stroke();
    }

    fn update(&mut self, dt: f32) -> Option<Recognition> {
        match self.gate.advance(dt) {
            GateStep::Blocked => return None,
            GateStep::Reset => {
                self.reset();
                return None;
            }
            GateStep::Open => {}
        }

        if self.drawing || !self.has_strokes() {
            return None;
        }
        self.idle.tick(dt);
        if self.idle.reached(self.config.recognition_delay) {
            return self.recognize();
        }
        None
    }

    fn clear(&mut self) {
        self.reset();
        self.gate.clear();
        log::debug!("Canvas cleared");
    }

    fn set_suspended(&mut self, suspended: bool) {
        if self.gate.set_suspended(suspended, &self.config) && self.drawing {
            log::debug!("Stroke cut off by suspension");
            self.current.clear();
            self.current_zone = None;
            self.drawing = false;
        }
    }

    fn set_expected_answer(&mut self, answer: Option<i64>) {
        self.gate.set_expected(answer);
    }

    fn state(&self) -> SessionState {
        if self.gate.is_suspended() {
            SessionState::Suspended
        } else if self.gate.is_locked() {
            SessionState::Cooldown
        } else if self.drawing {
            SessionState::Drawing
        } else if self.has_strokes() {
            SessionState::Awaiting
        } else {
            SessionState::Idle
        }
    }
}

fn make_zones(width: f32, colors: [ZoneColor; 2]) -> [Zone; 2] {
    let mid = width / 2.0;
    [
        Zone::new("left", colors[LEFT], 0.0, mid),
        Zone::new("right", colors[RIGHT], mid, width),
    ]
}
