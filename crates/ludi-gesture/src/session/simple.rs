use std::sync::Arc;
use glam::Vec2;
use crate::api::config::SessionConfig;
use crate::api::types::Recognition;
use crate::core::point::{Gesture, Point};
use crate::core::time::Stopwatch;
use crate::recognizer::Classifier;
use super::{CaptureSession, Gate, GateStep, SessionState};

/// Single-zone capture: every stroke on the surface belongs to one gesture,
/// classified after `recognition_delay` seconds without drawing.
pub struct SimpleSession {
    config: SessionConfig,
    classifier: Arc<Classifier>,
    /// Buffered samples of the current gesture, y inverted.
    points: Vec<Point>,
    /// Id of the most recent stroke, `None` before the first one.
    stroke_id: Option<u32>,
    stroke_count: usize,
    drawing: bool,
    idle: Stopwatch,
    gate: Gate,
}

impl SimpleSession {
    pub fn new(config: SessionConfig, classifier: Arc<Classifier>) -> Self {
        Self {
            config,
            classifier,
            points: Vec::with_capacity(256),
            stroke_id: None,
            stroke_count: 0,
            drawing: false,
            idle: Stopwatch::new(),
            gate: Gate::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Buffered samples, for the host to draw.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn stroke_count(&self) -> usize {
        self.stroke_count
    }

    /// Seconds since the last stroke ended.
    pub fn idle_time(&self) -> f32 {
        self.idle.elapsed()
    }

    fn reset(&mut self) {
        self.points.clear();
        self.stroke_id = None;
        self.stroke_count = 0;
        self.drawing = false;
        self.idle.reset();
    }

    fn recognize(&mut self) -> Option<Recognition> {
        let min_points = self.classifier.config().min_points;
        if self.points.len() < min_points {
            log::debug!(
                "Discarding gesture with {} points (need {})",
                self.points.len(),
                min_points
            );
            self.reset();
            return None;
        }

        // Points stay buffered through the cooldown so failure feedback can be drawn
        let candidate = Gesture::new("", self.points.clone());
        let recognition = match self.classifier.classify(&candidate) {
            Ok(classification) => Recognition::from_parts(vec![classification], self.gate.expected()),
            Err(e) => {
                log::warn!("Recognition failed: {}", e);
                Recognition::failed()
            }
        };
        log::info!(
            "Recognized {:?} (score {:.2}, succeeded: {})",
            recognition.label,
            recognition.score,
            recognition.succeeded
        );

        self.gate.lock(recognition.succeeded, &self.config);
        Some(recognition)
    }
}

impl CaptureSession for SimpleSession {
    fn pointer_down(&mut self, pos: Vec2) {
        if !self.gate.accepts_input() {
            return;
        }
        if !self.drawing && self.stroke_count == 0 {
            self.points.clear();
            self.stroke_id = None;
        }
        let id = self.stroke_id.map_or(0, |id| id + 1);
        self.stroke_id = Some(id);
        self.stroke_count += 1;
        self.drawing = true;
        self.idle.reset();
        self.points.push(Point::from_screen(pos, id));
    }

    fn pointer_move(&mut self, pos: Vec2) {
        if !self.gate.accepts_input() || !self.drawing {
            return;
        }
        let id = self.stroke_id.unwrap_or(0);
        self.points.push(Point::from_screen(pos, id));
    }

    fn pointer_up(&mut self, _pos: Vec2) {
        if !self.gate.accepts_input() || !self.drawing {
            return;
        }
        self.drawing = false;
        self.idle.reset();
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

        if self.drawing || self.stroke_count == 0 {
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
    }

    fn set_suspended(&mut self, suspended: bool) {
        if self.gate.set_suspended(suspended, &self.config) && self.drawing {
            // The cut-off stroke stays as drawn so far
            self.drawing = false;
            self.idle.reset();
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
        } else if self.stroke_count > 0 {
            SessionState::Awaiting
        } else {
            SessionState::Idle
        }
    }
}
