use glam::Vec2;
use crate::api::config::{Matching, RotationSearch};
use super::normalize;

/// A normalized, labeled point cloud ready for matching.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub label: String,
    pub points: Vec<Vec2>,
}

/// Mean distance between two equally-sized clouds under the given pairing.
pub fn cloud_distance(candidate: &[Vec2], template: &[Vec2], matching: Matching) -> f32 {
    let n = candidate.len().min(template.len());
    if n == 0 {
        return f32::MAX;
    }
    match matching {
        Matching::Greedy => greedy_distance(&candidate[..n], &template[..n]),
        Matching::Indexed => {
            candidate
                .iter()
                .zip(template)
                .map(|(a, b)| a.distance(*b))
                .sum::<f32>()
                / n as f32
        }
    }
}

/// Each candidate point, in order, claims the closest template point still free.
fn greedy_distance(candidate: &[Vec2], template: &[Vec2]) -> f32 {
    let n = candidate.len();
    let mut matched = vec![false; n];
    let mut sum = 0.0;
    for p in candidate {
        let mut best = f32::MAX;
        let mut best_idx = 0;
        for (j, q) in template.iter().enumerate() {
            if matched[j] {
                continue;
            }
            let d = p.distance_squared(*q);
            if d < best {
                best = d;
                best_idx = j;
            }
        }
        matched[best_idx] = true;
        sum += best.sqrt();
    }
    sum / n as f32
}

/// Distance after rotating the candidate by `radians` about the origin.
pub fn distance_at_angle(
    candidate: &[Vec2],
    template: &[Vec2],
    radians: f32,
    matching: Matching,
) -> f32 {
    let rotated = normalize::rotate(candidate, radians);
    cloud_distance(&rotated, template, matching)
}

/// Minimum distance over candidate rotations, found by golden-section search.
pub fn distance_at_best_angle(
    candidate: &[Vec2],
    template: &[Vec2],
    search: &RotationSearch,
    matching: Matching,
) -> f32 {
    let phi = 0.5 * (5.0_f32.sqrt() - 1.0);
    let threshold = search.threshold_deg.abs().to_radians().max(1e-4);
    let mut a = -search.max_angle_deg.abs().to_radians();
    let mut b = -a;

    let mut x1 = phi * a + (1.0 - phi) * b;
    let mut f1 = distance_at_angle(candidate, template, x1, matching);
    let mut x2 = (1.0 - phi) * a + phi * b;
    let mut f2 = distance_at_angle(candidate, template, x2, matching);

    while (b - a).abs() > threshold {
        if f1 < f2 {
            b = x2;
            x2 = x1;
            f2 = f1;
            x1 = phi * a + (1.0 - phi) * b;
            f1 = distance_at_angle(candidate, template, x1, matching);
        } else {
            a = x1;
            x1 = x2;
            f1 = f2;
            x2 = (1.0 - phi) * a + phi * b;
            f2 = distance_at_angle(candidate, template, x2, matching);
        }
    }
    // Unrotated comparison too, so enabling the search never makes a match worse
    let f0 = cloud_distance(candidate, template, matching);
    f0.min(f1).min(f2)
}
