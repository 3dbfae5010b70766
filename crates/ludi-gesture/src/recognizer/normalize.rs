// recognizer/normalize.rs
//
// Geometric preprocessing applied identically to templates and candidates:
// resample to N points by arc length, move the centroid to the origin,
// scale uniformly into the reference box.

use glam::Vec2;
use crate::api::config::ClassifierConfig;
use crate::core::point::Point;

/// Total path length, counting only segments inside a stroke.
/// The pen-up jump between strokes does not contribute.
pub fn path_length(points: &[Point]) -> f32 {
    points
        .windows(2)
        .filter(|w| w[0].stroke_id == w[1].stroke_id)
        .map(|w| w[0].pos().distance(w[1].pos()))
        .sum()
}

/// Resample a multi-stroke path into exactly `n` points spaced evenly by arc length.
///
/// Rounding shortfalls are padded with the last input point. Degenerate paths
/// (a single point, or zero length) start at the first point and are padded
/// the same way, so the output never has fewer than `n` points.
pub fn resample(points: &[Point], n: usize) -> Vec<Vec2> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n);
    out.push(first.pos());

    let interval = if n > 1 {
        path_length(points) / (n - 1) as f32
    } else {
        0.0
    };

    if interval > f32::EPSILON {
        let mut walked = 0.0;
        let mut prev = first.pos();
        for w in points.windows(2) {
            let cur = w[1].pos();
            if w[0].stroke_id != w[1].stroke_id {
                // New stroke: restart from its first sample without bridging the gap
                prev = cur;
                continue;
            }
            let mut seg = prev.distance(cur);
            while walked + seg >= interval && out.len() < n {
                let t = ((interval - walked) / seg).clamp(0.0, 1.0);
                let q = prev.lerp(cur, t);
                out.push(q);
                seg = walked + seg - interval;
                walked = 0.0;
                prev = q;
            }
            walked += seg;
            prev = cur;
        }
    }

    let last = points.last().map_or(first.pos(), Point::pos);
    out.resize(n, last);
    out
}

/// Mean of all points. Zero for an empty slice.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    points.iter().copied().sum::<Vec2>() / points.len() as f32
}

pub fn translate_to_origin(points: &[Vec2]) -> Vec<Vec2> {
    let c = centroid(points);
    points.iter().map(|&p| p - c).collect()
}

/// Scale uniformly so the larger bounding-box side equals `size`.
/// Aspect ratio is preserved; a zero-extent cloud is returned unchanged.
pub fn scale_to_box(points: &[Vec2], size: f32) -> Vec<Vec2> {
    let (min, max) = bounds(points);
    let extent = (max - min).max_element();
    if extent <= f32::EPSILON {
        return points.to_vec();
    }
    let factor = size / extent;
    points.iter().map(|&p| p * factor).collect()
}

/// Rotate about the origin by `radians` (counter-clockwise in gesture space).
pub fn rotate(points: &[Vec2], radians: f32) -> Vec<Vec2> {
    let r = Vec2::from_angle(radians);
    points.iter().map(|&p| r.rotate(p)).collect()
}

/// Full preprocessing: resample, center, scale.
pub fn normalize(points: &[Point], config: &ClassifierConfig) -> Vec<Vec2> {
    let resampled = resample(points, config.resample_points);
    let centered = translate_to_origin(&resampled);
    scale_to_box(&centered, config.reference_size)
}

fn bounds(points: &[Vec2]) -> (Vec2, Vec2) {
    if points.is_empty() {
        return (Vec2::ZERO, Vec2::ZERO);
    }
    points.iter().fold(
        (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
        |(lo, hi), &p| (lo.min(p), hi.max(p)),
    )
}
