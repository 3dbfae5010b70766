use crate::api::config::ClassifierConfig;
use crate::api::types::Classification;
use crate::assets::templates::TemplateStore;
use crate::core::point::Gesture;
use crate::error::RecognizeError;
use super::cloud::{self, PointCloud};
use super::normalize;

/// Nearest-neighbor classifier over normalized template clouds.
///
/// Templates are normalized once at construction. After that the classifier
/// is immutable, so one instance can be shared by every session via `Arc`.
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
    templates: Vec<PointCloud>,
}

impl Classifier {
    pub fn new(config: ClassifierConfig, store: &TemplateStore) -> Self {
        let config = config.sanitized();
        let templates = store
            .iter()
            .filter(|g| !g.points.is_empty())
            .map(|g| PointCloud {
                label: g.label.clone(),
                points: normalize::normalize(&g.points, &config),
            })
            .collect::<Vec<_>>();
        log::info!("Classifier ready with {} templates", templates.len());
        Self { config, templates }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// Template labels in store order (duplicates kept).
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.label.as_str())
    }

    /// Classify a candidate against every template.
    ///
    /// The first template with the minimum distance wins. Fails when the
    /// candidate has fewer than `min_points` samples or no templates exist.
    pub fn classify(&self, candidate: &Gesture) -> Result<Classification, RecognizeError> {
        let required = self.config.min_points.max(1);
        if candidate.point_count() < required {
            return Err(RecognizeError::TooFewPoints {
                found: candidate.point_count(),
                required,
            });
        }
        if self.templates.is_empty() {
            return Err(RecognizeError::NoTemplates);
        }

        let points = normalize::normalize(&candidate.points, &self.config);

        let mut best: Option<(usize, f32)> = None;
        for (idx, template) in self.templates.iter().enumerate() {
            let dist = self.distance(&points, template);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }

        let (template_index, distance) = best.ok_or(RecognizeError::NoTemplates)?;
        let score = (1.0 - distance / self.config.half_diagonal()).clamp(0.0, 1.0);
        let label = self.templates[template_index].label.clone();
        log::debug!("Classified as {} (score {:.2}, distance {:.4})", label, score, distance);

        Ok(Classification {
            label,
            score,
            distance,
            template_index,
        })
    }

    fn distance(&self, points: &[glam::Vec2], template: &PointCloud) -> f32 {
        match &self.config.rotation {
            Some(search) => {
                cloud::distance_at_best_angle(points, &template.points, search, self.config.matching)
            }
            None => cloud::cloud_distance(points, &template.points, self.config.matching),
        }
    }
}
