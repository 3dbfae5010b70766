use crate::core::point::{Gesture, Point, Stroke};

/// RGBA display color for a zone's strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ZoneColor {
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A horizontal slice `[min_x, max_x)` of the drawing surface that collects
/// the strokes begun inside it.
#[derive(Debug, Clone)]
pub struct Zone {
    pub name: String,
    pub color: ZoneColor,
    pub min_x: f32,
    pub max_x: f32,
    strokes: Vec<Stroke>,
}

impl Zone {
    pub fn new(name: impl Into<String>, color: ZoneColor, min_x: f32, max_x: f32) -> Self {
        Self {
            name: name.into(),
            color,
            min_x,
            max_x,
            strokes: Vec::new(),
        }
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.min_x && x < self.max_x
    }

    /// Commit a finished stroke; its id is its index within the zone.
    pub fn add_stroke(&mut self, points: Vec<Point>) {
        let mut stroke = Stroke::new(self.strokes.len() as u32);
        for p in &points {
            stroke.push(p.pos());
        }
        self.strokes.push(stroke);
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// All strokes of this zone as one candidate gesture.
    pub fn gesture(&self) -> Gesture {
        Gesture::from_stroke_list(self.name.clone(), &self.strokes)
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_half_open() {
        let zone = Zone::new("left", ZoneColor::RED, 0.0, 400.0);
        assert!(zone.contains(0.0));
        assert!(zone.contains(399.9));
        assert!(!zone.contains(400.0));
        assert!(!zone.contains(-1.0));
    }

    #[test]
    fn strokes_are_retagged_by_index() {
        let mut zone = Zone::new("right", ZoneColor::BLUE, 400.0, 800.0);
        zone.add_stroke(vec![Point::new(0.0, 0.0, 9), Point::new(1.0, 0.0, 9)]);
        zone.add_stroke(vec![Point::new(2.0, 0.0, 9)]);
        assert_eq!(zone.stroke_count(), 2);
        assert_eq!(zone.point_count(), 3);

        let g = zone.gesture();
        let ids: Vec<u32> = g.points.iter().map(|p| p.stroke_id).collect();
        assert_eq!(ids, vec![0, 0, 1]);

        zone.clear();
        assert!(zone.is_empty());
        assert_eq!(zone.point_count(), 0);
    }
}
