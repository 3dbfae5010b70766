use glam::Vec2;

/// A single captured sample.
///
/// Coordinates are stored with the y-axis inverted relative to the screen
/// (see [`Point::from_screen`]). Templates use the same convention, which
/// matters because matching is not invariant to reflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Which stroke of a multi-stroke gesture this sample belongs to.
    pub stroke_id: u32,
}

impl Point {
    pub fn new(x: f32, y: f32, stroke_id: u32) -> Self {
        Self { x, y, stroke_id }
    }

    /// Record a screen-space pointer position (y down) in gesture space (y up).
    pub fn from_screen(pos: Vec2, stroke_id: u32) -> Self {
        Self::new(pos.x, -pos.y, stroke_id)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One continuous pointer-down-to-up path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    pub id: u32,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            points: Vec::new(),
        }
    }

    /// Append a sample, tagging it with this stroke's id.
    pub fn push(&mut self, pos: Vec2) {
        self.points.push(Point::new(pos.x, pos.y, self.id));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A labeled shape made of one or more strokes: either a trained template
/// or a candidate waiting to be classified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gesture {
    pub label: String,
    pub points: Vec<Point>,
}

impl Gesture {
    pub fn new(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Build a gesture from raw `[x, y]` stroke arrays (the resource layout).
    /// Stroke ids are assigned by position in the outer list.
    pub fn from_strokes(label: impl Into<String>, strokes: &[Vec<[f32; 2]>]) -> Self {
        let points = strokes
            .iter()
            .enumerate()
            .flat_map(|(id, stroke)| {
                stroke
                    .iter()
                    .map(move |&[x, y]| Point::new(x, y, id as u32))
            })
            .collect();
        Self::new(label, points)
    }

    /// Flatten a list of strokes, re-tagging ids by stroke index.
    pub fn from_stroke_list(label: impl Into<String>, strokes: &[Stroke]) -> Self {
        let points = strokes
            .iter()
            .enumerate()
            .flat_map(|(id, stroke)| {
                stroke
                    .points
                    .iter()
                    .map(move |p| Point::new(p.x, p.y, id as u32))
            })
            .collect();
        Self::new(label, points)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of distinct strokes, counting a change of id along the sequence.
    pub fn stroke_count(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for p in &self.points {
            if last != Some(p.stroke_id) {
                count += 1;
                last = Some(p.stroke_id);
            }
        }
        count
    }

    /// Whether the gesture carries enough samples to be worth classifying.
    pub fn is_classifiable(&self, min_points: usize) -> bool {
        self.points.len() >= min_points
    }

    /// Map every point through `f`, keeping labels and stroke ids.
    pub fn transformed(&self, f: impl Fn(Vec2) -> Vec2) -> Self {
        let points = self
            .points
            .iter()
            .map(|p| {
                let q = f(p.pos());
                Point::new(q.x, q.y, p.stroke_id)
            })
            .collect();
        Self::new(self.label.clone(), points)
    }
}
